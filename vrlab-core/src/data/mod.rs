//! Price-source abstraction, CSV ingestion, and calendar alignment.

pub mod align;
pub mod csv;
pub mod source;

pub use align::{
    build_weekly_series, build_weekly_series_with_report, AlignError, AlignmentReport,
};
pub use csv::load_price_csv;
pub use source::{MemoryPriceTable, PriceSource, TableError};
