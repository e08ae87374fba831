//! Serializable analysis configuration.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for an analysis run (content-addressable hash).
pub type ConfigId = String;

/// Configuration surface for one analysis run.
///
/// Captures everything needed to reproduce a run: the calendar window, the
/// anchor weekday that defines "weekly", and the horizons to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Window start (inclusive).
    pub first_date: NaiveDate,

    /// Window end (inclusive).
    pub last_date: NaiveDate,

    /// Weekday sampled as the weekly observation.
    pub anchor_weekday: Weekday,

    /// Aggregation horizons to evaluate, each >= 2.
    pub horizons: Vec<usize>,
}

/// Structured error types for configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window is malformed: first date {first} is after last date {last}")]
    BadWindow { first: NaiveDate, last: NaiveDate },

    #[error("no horizons configured")]
    EmptyHorizons,

    #[error("horizon q={q} is below the minimum of 2")]
    HorizonTooSmall { q: usize },

    #[error("duplicate horizon q={q}")]
    DuplicateHorizon { q: usize },
}

impl AnalysisConfig {
    /// Check the window and horizon list. Horizon order is preserved as
    /// given; results are reported in the same order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_date > self.last_date {
            return Err(ConfigError::BadWindow {
                first: self.first_date,
                last: self.last_date,
            });
        }
        if self.horizons.is_empty() {
            return Err(ConfigError::EmptyHorizons);
        }
        let mut seen = std::collections::BTreeSet::new();
        for &q in &self.horizons {
            if q < 2 {
                return Err(ConfigError::HorizonTooSmall { q });
            }
            if !seen.insert(q) {
                return Err(ConfigError::DuplicateHorizon { q });
            }
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share an id, so callers can key
    /// cached or exported results by it.
    pub fn config_id(&self) -> ConfigId {
        let json = serde_json::to_string(self).expect("AnalysisConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
