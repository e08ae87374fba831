//! DailyObservation — one calendar day joined against the price source.

use chrono::NaiveDate;
use serde::Serialize;

/// One calendar day and the index level observed on it.
///
/// `level` is `None` for non-trading days and data gaps. Produced by joining
/// the full calendar backbone against the sparse price source; immutable once
/// the alignment pass is done.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub level: Option<f64>,
}

impl DailyObservation {
    /// Returns true if no level was observed on this day.
    pub fn is_missing(&self) -> bool {
        self.level.is_none()
    }
}
