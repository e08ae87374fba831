//! VRLab Core — calendar alignment and the Lo-MacKinlay variance-ratio test.
//!
//! This crate contains the analysis pipeline:
//! - Domain types (daily observations, the gap-free weekly series)
//! - Price-source trait with in-memory and CSV-backed tables
//! - Calendar aligner (daily backbone, forward-substitution gap-fill,
//!   anchor-weekday sampling)
//! - Variance-ratio estimator with the heteroskedasticity-robust z-score
//! - Serializable run configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod stats;

pub use config::{AnalysisConfig, ConfigError, ConfigId};
pub use data::{
    build_weekly_series, build_weekly_series_with_report, load_price_csv, AlignError,
    AlignmentReport, MemoryPriceTable, PriceSource, TableError,
};
pub use domain::{DailyObservation, WeeklyPoint, WeeklySeries};
pub use stats::{estimate, evaluate_horizons, EstimateError, VarianceRatioResult};
