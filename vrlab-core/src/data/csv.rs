//! CSV ingestion for the daily price table.
//!
//! Expects two columns, `date,level`, with ISO dates (`YYYY-MM-DD`). A
//! header row is optional: a first row whose date column reads `date` is
//! skipped. Rows surface as typed [`TableError`]s, never as silently
//! dropped records.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};

use crate::data::source::{MemoryPriceTable, TableError};

/// Load a `date,level` CSV file into an in-memory price table.
pub fn load_price_csv(path: &Path) -> Result<MemoryPriceTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| TableError::Io(e.to_string()))?;

    let mut table = MemoryPriceTable::new(path.display().to_string());

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::Io(e.to_string()))?;
        let row = index + 1;

        let date_field = record.get(0).unwrap_or_default();
        if row == 1 && date_field.eq_ignore_ascii_case("date") {
            continue;
        }
        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d").map_err(|_| {
            TableError::Parse {
                row,
                value: date_field.to_string(),
                expected: "date (YYYY-MM-DD)",
            }
        })?;

        let level_field = record.get(1).unwrap_or_default();
        let level: f64 = level_field.parse().map_err(|_| TableError::Parse {
            row,
            value: level_field.to_string(),
            expected: "level (positive number)",
        })?;

        table.insert(date, level)?;
    }

    Ok(table)
}
