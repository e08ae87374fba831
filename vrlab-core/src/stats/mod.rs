//! Variance-ratio estimation.

mod normal;
pub mod variance_ratio;

pub use variance_ratio::{estimate, evaluate_horizons, EstimateError, VarianceRatioResult};
