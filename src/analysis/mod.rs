//! Analysis module - grouped aggregations and dashboard assembly

mod aggregator;
mod dashboard;
pub mod labels;
mod summary;

pub use aggregator::{
    aggregate, analyze_hourly_usage, analyze_monthly_usage, summarize_casual_registered,
    summarize_holiday_usage, summarize_season_usage, summarize_weather_usage,
    summarize_workday_usage, AggRow, AggSpec, AggregationResult, AnalysisError, LabelMap, Metric,
};
pub use dashboard::{build_dashboard, DashboardData};
pub use summary::{
    compare_holiday_workday, day_type_usage, seasonal_means, top_hour, top_season,
    DayTypeComparison, HourHighlight, SeasonHighlight,
};
