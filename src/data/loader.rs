//! Dataset Loader Module
//! Loads the daily and hourly bike-sharing CSVs with Polars, validates their
//! schema and parses the date column.

use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parsed date column added next to the raw `dteday` strings.
pub const DATE_COLUMN: &str = "date";
const RAW_DATE_COLUMN: &str = "dteday";
const DATE_FORMAT: &str = "%Y-%m-%d";

const DAY_COLUMNS: &[&str] = &[
    "dteday",
    "season",
    "yr",
    "mnth",
    "holiday",
    "workingday",
    "weathersit",
    "casual",
    "registered",
    "cnt",
];
const HOUR_COLUMNS: &[&str] = &[
    "dteday",
    "season",
    "yr",
    "mnth",
    "hr",
    "holiday",
    "workingday",
    "weathersit",
    "cnt",
];

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to load CSV {path}: {source}")]
    Csv { path: PathBuf, source: PolarsError },
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("{path}: could not parse 'dteday' as dates: {source}")]
    DateParse { path: PathBuf, source: PolarsError },
    #[error("dataset has no rows")]
    Empty,
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Load both datasets. Fatal at startup: a missing file, unreadable CSV or
/// schema mismatch aborts the dashboard before any UI state exists.
pub fn load(day_path: &Path, hour_path: &Path) -> Result<(DataFrame, DataFrame), DataLoadError> {
    let day = load_table(day_path, DAY_COLUMNS)?;
    let hour = load_table(hour_path, HOUR_COLUMNS)?;
    info!(
        "loaded {} daily rows from {} and {} hourly rows from {}",
        day.height(),
        day_path.display(),
        hour.height(),
        hour_path.display()
    );
    Ok((day, hour))
}

fn load_table(path: &Path, required: &[&str]) -> Result<DataFrame, DataLoadError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    ensure_columns(&df, required, path)?;
    with_date_column(df).map_err(|source| DataLoadError::DateParse {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_columns(df: &DataFrame, required: &[&str], path: &Path) -> Result<(), DataLoadError> {
    let names = df.get_column_names();
    for column in required {
        if !names.iter().any(|n| n.as_str() == *column) {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Parse the raw `dteday` strings into a typed `date` column.
pub(crate) fn with_date_column(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .with_column(
            col(RAW_DATE_COLUMN)
                .str()
                .to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    ..Default::default()
                })
                .alias(DATE_COLUMN),
        )
        .collect()
}

/// Earliest and latest date in a loaded table, used to bound the sidebar
/// range picker.
pub fn date_bounds(df: &DataFrame) -> Result<(NaiveDate, NaiveDate), DataLoadError> {
    let column = df.column(DATE_COLUMN)?;
    let dates = column.as_materialized_series().date()?;
    match (dates.min(), dates.max()) {
        (Some(min), Some(max)) => Ok((date_from_days(min), date_from_days(max))),
        _ => Err(DataLoadError::Empty),
    }
}

/// Polars stores dates as days since the Unix epoch.
fn date_from_days(days: i32) -> NaiveDate {
    NaiveDate::default() + chrono::Duration::days(days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::fs;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("ride_insights_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    const DAY_CSV: &str = "\
dteday,season,yr,mnth,holiday,workingday,weathersit,casual,registered,cnt
2011-01-01,1,0,1,0,0,2,331,654,985
2011-01-02,1,0,1,0,0,2,131,670,801
";

    const HOUR_CSV: &str = "\
dteday,season,yr,mnth,hr,holiday,workingday,weathersit,cnt
2011-01-01,1,0,1,0,0,0,1,16
2011-01-01,1,0,1,1,0,0,1,40
";

    #[test]
    fn load_parses_dates_and_reports_bounds() {
        let day_path = temp_csv("day.csv", DAY_CSV);
        let hour_path = temp_csv("hour.csv", HOUR_CSV);

        let (day, hour) = load(&day_path, &hour_path).unwrap();
        assert_eq!(day.height(), 2);
        assert_eq!(hour.height(), 2);
        assert!(day.column(DATE_COLUMN).is_ok());

        let (min, max) = date_bounds(&day).unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2011, 1, 2).unwrap());

        fs::remove_file(day_path).ok();
        fs::remove_file(hour_path).ok();
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let missing = std::env::temp_dir().join("ride_insights_does_not_exist.csv");
        let hour_path = temp_csv("hour2.csv", HOUR_CSV);
        let result = load(&missing, &hour_path);
        assert!(matches!(result, Err(DataLoadError::Csv { .. })));
        fs::remove_file(hour_path).ok();
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let truncated = "\
dteday,season,yr,mnth,holiday,workingday,weathersit,casual,registered
2011-01-01,1,0,1,0,0,2,331,654
";
        let day_path = temp_csv("day_no_cnt.csv", truncated);
        let hour_path = temp_csv("hour3.csv", HOUR_CSV);
        match load(&day_path, &hour_path) {
            Err(DataLoadError::MissingColumn { column, .. }) => assert_eq!(column, "cnt"),
            other => panic!("expected MissingColumn, got {:?}", other.map(|_| ())),
        }
        fs::remove_file(day_path).ok();
        fs::remove_file(hour_path).ok();
    }

    #[test]
    fn bounds_of_empty_table_are_an_error() {
        let df = df!("dteday" => ["2011-01-01"], "cnt" => [1i64]).unwrap();
        let df = with_date_column(df).unwrap().head(Some(0));
        assert!(matches!(date_bounds(&df), Err(DataLoadError::Empty)));
    }
}
