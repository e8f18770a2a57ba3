//! Aggregation Engine Module
//! One declarative groupby + metric + label pass shared by every dashboard
//! summary, using Polars lazy groupby.

use crate::analysis::labels;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("no rows to analyze")]
    NoData,
}

/// Metric applied to the value column of each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Sum,
    Mean,
}

/// Maps one group-key column to a display label column.
pub struct LabelMap {
    /// Group-key column the codes come from.
    pub key: &'static str,
    /// Display name of the label column.
    pub name: &'static str,
    pub map: fn(i64) -> Option<&'static str>,
}

impl LabelMap {
    /// Render the label for one row of group keys. Codes without a mapping
    /// fall back to the raw number so the output stays total.
    fn render(&self, keys: &[i64], group_keys: &[&str]) -> String {
        let Some(idx) = group_keys.iter().position(|k| *k == self.key) else {
            return String::new();
        };
        let code = keys[idx];
        match (self.map)(code) {
            Some(label) => label.to_string(),
            None => code.to_string(),
        }
    }
}

/// Declarative description of one aggregation.
pub struct AggSpec {
    pub name: &'static str,
    pub group_keys: &'static [&'static str],
    pub value: &'static str,
    pub metric: Metric,
    pub labels: &'static [LabelMap],
}

/// One aggregated group: raw key codes, display labels, metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggRow {
    pub keys: Vec<i64>,
    pub labels: Vec<String>,
    pub value: f64,
}

/// Ordered aggregation output. Rows are sorted ascending by key tuple and
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    pub name: &'static str,
    pub key_names: &'static [&'static str],
    pub label_names: Vec<&'static str>,
    pub value_name: &'static str,
    pub metric: Metric,
    pub rows: Vec<AggRow>,
}

impl AggregationResult {
    fn empty(spec: &AggSpec) -> Self {
        Self {
            name: spec.name,
            key_names: spec.group_keys,
            label_names: spec.labels.iter().map(|l| l.name).collect(),
            value_name: spec.value,
            metric: spec.metric,
            rows: Vec::new(),
        }
    }

    /// Sum of the metric column across all rows.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// First row carrying the given label in its first label column.
    pub fn row_by_label(&self, label: &str) -> Option<&AggRow> {
        self.rows
            .iter()
            .find(|r| r.labels.first().map(String::as_str) == Some(label))
    }
}

/// Group `df` by `spec.group_keys`, apply the metric to `spec.value`, sort
/// ascending by key tuple and attach display labels. An empty input frame
/// yields an empty (zero-row) result rather than an error.
pub fn aggregate(df: &DataFrame, spec: &AggSpec) -> Result<AggregationResult, AnalysisError> {
    let mut result = AggregationResult::empty(spec);
    if df.height() == 0 {
        return Ok(result);
    }

    let group_exprs: Vec<Expr> = spec.group_keys.iter().map(|k| col(*k)).collect();
    let metric_expr = match spec.metric {
        Metric::Sum => col(spec.value).sum(),
        Metric::Mean => col(spec.value).mean(),
    };
    let sort_keys: Vec<PlSmallStr> = spec
        .group_keys
        .iter()
        .map(|k| PlSmallStr::from_static(*k))
        .collect();

    let grouped = df
        .clone()
        .lazy()
        .group_by(group_exprs)
        .agg([metric_expr.alias(spec.value)])
        .sort(sort_keys, SortMultipleOptions::default())
        .collect()?;

    let mut key_cols = Vec::with_capacity(spec.group_keys.len());
    for key in spec.group_keys {
        key_cols.push(grouped.column(*key)?.cast(&DataType::Int64)?);
    }
    let mut key_cas = Vec::with_capacity(key_cols.len());
    for key_col in &key_cols {
        key_cas.push(key_col.i64()?);
    }
    let value_f64 = grouped.column(spec.value)?.cast(&DataType::Float64)?;
    let value_ca = value_f64.f64()?;

    'rows: for i in 0..grouped.height() {
        let mut keys = Vec::with_capacity(key_cas.len());
        for ca in &key_cas {
            match ca.get(i) {
                Some(v) => keys.push(v),
                None => continue 'rows,
            }
        }
        let Some(value) = value_ca.get(i) else {
            continue;
        };
        let labels = spec
            .labels
            .iter()
            .map(|lm| lm.render(&keys, spec.group_keys))
            .collect();
        result.rows.push(AggRow { keys, labels, value });
    }

    Ok(result)
}

pub const MONTHLY_USAGE: AggSpec = AggSpec {
    name: "Monthly Bike Usage",
    group_keys: &["mnth", "yr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[
        LabelMap {
            key: "mnth",
            name: "Month",
            map: labels::month_name,
        },
        LabelMap {
            key: "yr",
            name: "Year",
            map: labels::year_label,
        },
    ],
};

pub const HOURLY_USAGE: AggSpec = AggSpec {
    name: "Hourly Bike Usage",
    group_keys: &["hr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[],
};

pub const HOLIDAY_USAGE: AggSpec = AggSpec {
    name: "Holiday Usage",
    group_keys: &["holiday", "yr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[
        LabelMap {
            key: "holiday",
            name: "Day Type",
            map: labels::holiday_label,
        },
        LabelMap {
            key: "yr",
            name: "Year",
            map: labels::year_label,
        },
    ],
};

pub const WORKDAY_USAGE: AggSpec = AggSpec {
    name: "Workday Usage",
    group_keys: &["workingday", "yr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[
        LabelMap {
            key: "workingday",
            name: "Day Category",
            map: labels::workday_label,
        },
        LabelMap {
            key: "yr",
            name: "Year",
            map: labels::year_label,
        },
    ],
};

pub const SEASON_USAGE: AggSpec = AggSpec {
    name: "Seasonal Usage",
    group_keys: &["season", "yr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[
        LabelMap {
            key: "season",
            name: "Season",
            map: labels::season_name,
        },
        LabelMap {
            key: "yr",
            name: "Year",
            map: labels::year_label,
        },
    ],
};

pub const WEATHER_USAGE: AggSpec = AggSpec {
    name: "Weather Usage",
    group_keys: &["weathersit", "yr"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[
        LabelMap {
            key: "weathersit",
            name: "Weather Condition",
            map: labels::weather_condition,
        },
        LabelMap {
            key: "yr",
            name: "Year",
            map: labels::year_label,
        },
    ],
};

pub const WEATHER_TOTALS: AggSpec = AggSpec {
    name: "Usage by Weather Condition",
    group_keys: &["weathersit"],
    value: "cnt",
    metric: Metric::Sum,
    labels: &[LabelMap {
        key: "weathersit",
        name: "Weather Condition",
        map: labels::weather_condition,
    }],
};

/// Total casual and registered riders over the whole filtered range.
pub fn summarize_casual_registered(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    let mut result = AggregationResult {
        name: "Casual vs Registered Users",
        key_names: &[],
        label_names: vec!["User Type"],
        value_name: "Total",
        metric: Metric::Sum,
        rows: Vec::new(),
    };
    if df.height() == 0 {
        return Ok(result);
    }
    for (label, column) in [("Casual", "casual"), ("Registered", "registered")] {
        let total = df
            .column(column)?
            .cast(&DataType::Int64)?
            .i64()?
            .sum()
            .unwrap_or(0);
        result.rows.push(AggRow {
            keys: Vec::new(),
            labels: vec![label.to_string()],
            value: total as f64,
        });
    }
    Ok(result)
}

pub fn analyze_monthly_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &MONTHLY_USAGE)
}

/// Hourly ride totals, materialized over the full 0-23 hour domain. Hours
/// absent from the filtered table count as zero so the chart and the argmax
/// below never see gaps.
pub fn analyze_hourly_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    let mut result = aggregate(df, &HOURLY_USAGE)?;
    let mut by_hour = [0.0f64; 24];
    for row in &result.rows {
        if let Some(&h) = row.keys.first() {
            if (0..24).contains(&h) {
                by_hour[h as usize] = row.value;
            }
        }
    }
    result.label_names = vec!["Hour"];
    result.rows = (0..24)
        .map(|h| AggRow {
            keys: vec![h],
            labels: vec![labels::hour_label(h)],
            value: by_hour[h as usize],
        })
        .collect();
    Ok(result)
}

pub fn summarize_holiday_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &HOLIDAY_USAGE)
}

pub fn summarize_workday_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &WORKDAY_USAGE)
}

pub fn summarize_season_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &SEASON_USAGE)
}

pub fn summarize_weather_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &WEATHER_USAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn day_frame() -> DataFrame {
        df!(
            "season" => [1i64, 1, 2],
            "yr" => [0i64, 1, 0],
            "mnth" => [1i64, 2, 4],
            "holiday" => [0i64, 1, 0],
            "workingday" => [1i64, 0, 0],
            "weathersit" => [1i64, 2, 1],
            "casual" => [30i64, 50, 20],
            "registered" => [70i64, 150, 80],
            "cnt" => [100i64, 200, 100],
        )
        .unwrap()
    }

    #[test]
    fn season_groups_split_by_year() {
        let rows = df!(
            "season" => [1i64, 1],
            "yr" => [0i64, 1],
            "cnt" => [100i64, 200],
        )
        .unwrap();

        let result = summarize_season_usage(&rows).unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].labels, vec!["Spring", "2011"]);
        assert_eq!(result.rows[0].value, 100.0);
        assert_eq!(result.rows[1].labels, vec!["Spring", "2012"]);
        assert_eq!(result.rows[1].value, 200.0);
    }

    #[test]
    fn casual_registered_total_matches_cnt() {
        let day = day_frame();
        let result = summarize_casual_registered(&day).unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].labels[0], "Casual");
        assert_eq!(result.rows[1].labels[0], "Registered");

        let cnt_total: i64 = day.column("cnt").unwrap().i64().unwrap().sum().unwrap();
        assert_eq!(result.total(), cnt_total as f64);
    }

    #[test]
    fn monthly_rows_sorted_and_labeled() {
        let day = day_frame();
        let result = analyze_monthly_usage(&day).unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0].labels, vec!["Jan", "2011"]);
        assert_eq!(result.rows[1].labels, vec!["Feb", "2012"]);
        assert_eq!(result.rows[2].labels, vec!["Apr", "2011"]);
        assert_eq!(result.rows[0].keys, vec![1, 0]);
    }

    #[test]
    fn hourly_gap_fill_materializes_all_hours() {
        let hour = df!(
            "hr" => [0i64, 1, 2, 3, 4, 6],
            "cnt" => [10i64, 20, 30, 40, 50, 60],
        )
        .unwrap();

        let result = analyze_hourly_usage(&hour).unwrap();
        assert_eq!(result.rows.len(), 24);
        assert_eq!(result.rows[5].keys, vec![5]);
        assert_eq!(result.rows[5].value, 0.0);
        assert_eq!(result.rows[6].value, 60.0);
        assert!(result.rows.iter().all(|r| r.value >= 0.0));
    }

    #[test]
    fn hourly_sums_duplicate_hours() {
        let hour = df!(
            "hr" => [7i64, 7, 8],
            "cnt" => [5i64, 15, 9],
        )
        .unwrap();

        let result = analyze_hourly_usage(&hour).unwrap();
        assert_eq!(result.rows[7].value, 20.0);
        assert_eq!(result.rows[8].value, 9.0);
    }

    #[test]
    fn empty_frame_yields_empty_results() {
        let empty = day_frame().head(Some(0));
        assert_eq!(empty.height(), 0);

        assert!(summarize_season_usage(&empty).unwrap().rows.is_empty());
        assert!(summarize_weather_usage(&empty).unwrap().rows.is_empty());
        assert!(summarize_holiday_usage(&empty).unwrap().rows.is_empty());
        assert!(summarize_workday_usage(&empty).unwrap().rows.is_empty());
        assert!(analyze_monthly_usage(&empty).unwrap().rows.is_empty());
        assert!(summarize_casual_registered(&empty).unwrap().rows.is_empty());
    }

    #[test]
    fn unmapped_code_falls_back_to_raw_number() {
        let rows = df!(
            "weathersit" => [9i64],
            "yr" => [0i64],
            "cnt" => [42i64],
        )
        .unwrap();

        let result = summarize_weather_usage(&rows).unwrap();
        assert_eq!(result.rows[0].labels, vec!["9", "2011"]);
    }

    #[test]
    fn holiday_and_workday_labels() {
        let day = day_frame();

        let holiday = summarize_holiday_usage(&day).unwrap();
        assert!(holiday.row_by_label("Holiday").is_some());
        assert!(holiday.row_by_label("Non-Holiday").is_some());

        let workday = summarize_workday_usage(&day).unwrap();
        assert!(workday.row_by_label("Workday").is_some());
        assert!(workday.row_by_label("Non-Workday").is_some());
    }
}
