//! Narrative Summary Module
//! Derived aggregates behind the dashboard's highlight strings: day-type
//! averages, the busiest season and the busiest hour.

use crate::analysis::aggregator::{
    aggregate, analyze_hourly_usage, AggSpec, AggregationResult, AnalysisError, LabelMap, Metric,
};
use crate::analysis::labels;
use polars::prelude::*;

const DAY_TYPE_USAGE: AggSpec = AggSpec {
    name: "Usage by Day Type",
    group_keys: &["holiday", "workingday"],
    value: "cnt",
    metric: Metric::Mean,
    labels: &[],
};

const SEASONAL_MEAN: AggSpec = AggSpec {
    name: "Average Usage by Season",
    group_keys: &["season"],
    value: "cnt",
    metric: Metric::Mean,
    labels: &[LabelMap {
        key: "season",
        name: "Season",
        map: labels::season_name,
    }],
};

/// Holiday vs working-day average, for the "is usage higher on holidays?"
/// narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTypeComparison {
    pub holiday_avg: f64,
    pub workday_avg: f64,
}

impl DayTypeComparison {
    pub fn holidays_win(&self) -> bool {
        self.holiday_avg > self.workday_avg
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonHighlight {
    pub season: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourHighlight {
    pub hour: i64,
    pub total: f64,
}

/// Average daily riders grouped by (holiday, workingday), relabeled with the
/// three-way day classification. A holiday row wins over the workingday flag.
pub fn day_type_usage(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    let mut result = aggregate(df, &DAY_TYPE_USAGE)?;
    result.label_names = vec!["Day Type"];
    for row in &mut result.rows {
        if let [holiday, workingday] = row.keys[..] {
            row.labels = vec![labels::day_type(holiday, workingday).to_string()];
        }
    }
    Ok(result)
}

/// Holiday vs working-day comparison over an already computed day-type
/// result. `None` when the filtered range lacks either day type, so the
/// caller degrades to no narrative instead of indexing a missing row.
pub fn compare_holiday_workday(day_types: &AggregationResult) -> Option<DayTypeComparison> {
    let holiday = day_types.row_by_label("Holiday")?;
    let workday = day_types.row_by_label("Working Day")?;
    Some(DayTypeComparison {
        holiday_avg: holiday.value,
        workday_avg: workday.value,
    })
}

/// Average riders per season, labeled with season names.
pub fn seasonal_means(df: &DataFrame) -> Result<AggregationResult, AnalysisError> {
    aggregate(df, &SEASONAL_MEAN)
}

/// Season with the highest average usage. Rows come back sorted ascending by
/// season code, so a tie resolves to the lowest code.
pub fn top_season(df: &DataFrame) -> Result<SeasonHighlight, AnalysisError> {
    let means = seasonal_means(df)?;
    let mut best: Option<&crate::analysis::aggregator::AggRow> = None;
    for row in &means.rows {
        match best {
            Some(current) if row.value <= current.value => {}
            _ => best = Some(row),
        }
    }
    let best = best.ok_or(AnalysisError::NoData)?;
    Ok(SeasonHighlight {
        season: best
            .labels
            .first()
            .cloned()
            .unwrap_or_else(|| best.keys.first().copied().unwrap_or_default().to_string()),
        average: best.value,
    })
}

/// Hour of day with the highest ride total over the gap-filled 24-hour
/// profile. Empty input is a `NoData` error, never an argmax over zeros.
pub fn top_hour(df: &DataFrame) -> Result<HourHighlight, AnalysisError> {
    if df.height() == 0 {
        return Err(AnalysisError::NoData);
    }
    let profile = analyze_hourly_usage(df)?;
    let mut best_hour = 0i64;
    let mut best_total = f64::NEG_INFINITY;
    for row in &profile.rows {
        if row.value > best_total {
            best_total = row.value;
            best_hour = row.keys.first().copied().unwrap_or_default();
        }
    }
    Ok(HourHighlight {
        hour: best_hour,
        total: best_total,
    })
}
