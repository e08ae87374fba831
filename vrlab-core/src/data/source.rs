//! Price source trait and the in-memory table implementation.
//!
//! The PriceSource trait abstracts over daily price-level stores (CSV table,
//! in-memory fixture, database-backed store) so the aligner can consume any
//! of them and tests can mock the store. Connection lifecycle and transport
//! belong entirely to the implementations.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

/// Structured error types for price-table construction.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read price table: {0}")]
    Io(String),

    #[error("row {row}: cannot parse '{value}' as {expected}")]
    Parse {
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("duplicate date {date} in price table")]
    DuplicateDate { date: NaiveDate },

    #[error("non-positive level {level} on {date}")]
    NonPositiveLevel { date: NaiveDate, level: f64 },
}

/// Trait for daily price-level sources.
///
/// A source is a bounded `date -> level` lookup; it does not enumerate the
/// calendar (calendar generation is pure date arithmetic and lives in the
/// aligner). Implementations own any I/O and retry concerns.
pub trait PriceSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// The level observed on `date`, or `None` for a non-trading day / gap.
    fn lookup(&self, date: NaiveDate) -> Option<f64>;
}

/// In-memory price table backed by a date-ordered map.
///
/// The canonical fixture source for tests, and the product of CSV ingestion.
/// Rejects duplicate dates and non-positive levels at insertion.
#[derive(Debug, Clone)]
pub struct MemoryPriceTable {
    name: String,
    levels: BTreeMap<NaiveDate, f64>,
}

impl MemoryPriceTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: BTreeMap::new(),
        }
    }

    /// Insert one observation. Fails on a duplicate date or a level <= 0.
    pub fn insert(&mut self, date: NaiveDate, level: f64) -> Result<(), TableError> {
        if !level.is_finite() || level <= 0.0 {
            return Err(TableError::NonPositiveLevel { date, level });
        }
        if self.levels.contains_key(&date) {
            return Err(TableError::DuplicateDate { date });
        }
        self.levels.insert(date, level);
        Ok(())
    }

    /// Build a table from `(date, level)` pairs.
    pub fn from_pairs(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new(name);
        for (date, level) in pairs {
            table.insert(date, level)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// First and last observed dates, if any.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.levels.keys().next()?;
        let last = self.levels.keys().next_back()?;
        Some((*first, *last))
    }
}

impl PriceSource for MemoryPriceTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, date: NaiveDate) -> Option<f64> {
        self.levels.get(&date).copied()
    }
}
