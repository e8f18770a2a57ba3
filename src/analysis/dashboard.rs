//! Dashboard Assembly Module
//! One synchronous recompute pass over the filtered tables, producing every
//! aggregate and highlight the view needs.

use crate::analysis::aggregator::{
    aggregate, analyze_hourly_usage, analyze_monthly_usage, summarize_casual_registered,
    summarize_holiday_usage, summarize_season_usage, summarize_weather_usage,
    summarize_workday_usage, AggregationResult, AnalysisError, WEATHER_TOTALS,
};
use crate::analysis::summary::{
    compare_holiday_workday, day_type_usage, seasonal_means, top_hour, top_season,
    DayTypeComparison, HourHighlight, SeasonHighlight,
};
use log::debug;
use polars::prelude::*;

/// All aggregates for one filtered date range. Rebuilt from scratch on every
/// filter change; holds no references into the base tables.
pub struct DashboardData {
    pub monthly: AggregationResult,
    pub user_types: AggregationResult,
    pub day_types: AggregationResult,
    pub holiday_comparison: Option<DayTypeComparison>,
    pub holiday: AggregationResult,
    pub workday: AggregationResult,
    pub season: AggregationResult,
    pub season_means: AggregationResult,
    pub top_season: Option<SeasonHighlight>,
    pub weather: AggregationResult,
    pub weather_totals: AggregationResult,
    pub hourly: AggregationResult,
    pub top_hour: Option<HourHighlight>,
}

/// Run every aggregation over the filtered daily and hourly tables.
pub fn build_dashboard(
    day: &DataFrame,
    hour: &DataFrame,
) -> Result<DashboardData, AnalysisError> {
    debug!(
        "rebuilding dashboard: {} daily rows, {} hourly rows",
        day.height(),
        hour.height()
    );

    let day_types = day_type_usage(day)?;
    let holiday_comparison = compare_holiday_workday(&day_types);

    Ok(DashboardData {
        monthly: analyze_monthly_usage(day)?,
        user_types: summarize_casual_registered(day)?,
        holiday_comparison,
        day_types,
        holiday: summarize_holiday_usage(day)?,
        workday: summarize_workday_usage(day)?,
        season: summarize_season_usage(day)?,
        season_means: seasonal_means(day)?,
        top_season: optional(top_season(day))?,
        weather: summarize_weather_usage(day)?,
        weather_totals: aggregate(day, &WEATHER_TOTALS)?,
        hourly: analyze_hourly_usage(hour)?,
        top_hour: optional(top_hour(hour))?,
    })
}

/// `NoData` degrades a highlight to absent; real errors still propagate.
fn optional<T>(result: Result<T, AnalysisError>) -> Result<Option<T>, AnalysisError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AnalysisError::NoData) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn empty_tables_build_an_empty_dashboard() {
        let day = df!(
            "season" => [1i64], "yr" => [0i64], "mnth" => [1i64],
            "holiday" => [0i64], "workingday" => [1i64], "weathersit" => [1i64],
            "casual" => [1i64], "registered" => [2i64], "cnt" => [3i64],
        )
        .unwrap()
        .head(Some(0));
        let hour = df!("hr" => [0i64], "cnt" => [1i64]).unwrap().head(Some(0));

        let data = build_dashboard(&day, &hour).unwrap();
        assert!(data.monthly.rows.is_empty());
        assert!(data.user_types.rows.is_empty());
        assert!(data.holiday_comparison.is_none());
        assert!(data.top_season.is_none());
        assert!(data.top_hour.is_none());
        // gap fill still materializes the full hour domain
        assert_eq!(data.hourly.rows.len(), 24);
        assert!(data.hourly.rows.iter().all(|r| r.value == 0.0));
    }

    #[test]
    fn filtered_range_flows_through_the_dashboard() {
        let day = crate::data::loader::with_date_column(
            df!(
                "dteday" => ["2011-01-01", "2011-06-15", "2012-03-05"],
                "season" => [1i64, 2, 1],
                "yr" => [0i64, 0, 1],
                "mnth" => [1i64, 6, 3],
                "holiday" => [0i64, 0, 0],
                "workingday" => [1i64, 1, 0],
                "weathersit" => [1i64, 1, 2],
                "casual" => [5i64, 10, 15],
                "registered" => [45i64, 90, 135],
                "cnt" => [50i64, 100, 150],
            )
            .unwrap(),
        )
        .unwrap();
        let hour = crate::data::loader::with_date_column(
            df!(
                "dteday" => ["2011-01-01", "2011-06-15"],
                "hr" => [8i64, 17],
                "cnt" => [30i64, 70],
            )
            .unwrap(),
        )
        .unwrap();

        let start = chrono::NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2011, 12, 31).unwrap();
        let day_filtered = crate::data::filter_by_date(&day, start, end).unwrap();
        let hour_filtered = crate::data::filter_by_date(&hour, start, end).unwrap();
        assert_eq!(day_filtered.height(), 2);

        let data = build_dashboard(&day_filtered, &hour_filtered).unwrap();
        assert_eq!(data.user_types.total(), 150.0);
        assert_eq!(data.top_hour.as_ref().unwrap().hour, 17);
        assert!(data.monthly.rows.iter().all(|r| r.labels[1] == "2011"));
    }

    #[test]
    fn full_pass_populates_every_section() {
        let day = df!(
            "season" => [1i64, 2], "yr" => [0i64, 1], "mnth" => [1i64, 6],
            "holiday" => [1i64, 0], "workingday" => [0i64, 1], "weathersit" => [1i64, 2],
            "casual" => [10i64, 20], "registered" => [90i64, 180], "cnt" => [100i64, 200],
        )
        .unwrap();
        let hour = df!("hr" => [8i64, 17], "cnt" => [60i64, 90]).unwrap();

        let data = build_dashboard(&day, &hour).unwrap();
        assert_eq!(data.monthly.rows.len(), 2);
        assert_eq!(data.user_types.total(), 300.0);
        assert!(data.holiday_comparison.is_some());
        assert_eq!(data.top_season.as_ref().unwrap().season, "Summer");
        assert_eq!(data.top_hour.as_ref().unwrap().hour, 17);
        assert_eq!(data.weather_totals.rows.len(), 2);
    }
}
