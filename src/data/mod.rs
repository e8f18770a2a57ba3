//! Data module - CSV loading and date filtering

mod filter;
pub mod loader;

pub use filter::filter_by_date;
pub use loader::{date_bounds, load, DataLoadError, DATE_COLUMN};
