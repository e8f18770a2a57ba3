//! Date Filter Module
//! Inclusive date-range filtering over the loaded tables.

use crate::data::loader::DATE_COLUMN;
use chrono::NaiveDate;
use polars::prelude::*;

/// Rows with `start <= date <= end`, both ends inclusive, original row order
/// preserved. A reversed range matches nothing and yields an empty frame.
pub fn filter_by_date(
    df: &DataFrame,
    start: NaiveDate,
    end: NaiveDate,
) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(
            col(DATE_COLUMN)
                .gt_eq(lit(start))
                .and(col(DATE_COLUMN).lt_eq(lit(end))),
        )
        .collect()
}
