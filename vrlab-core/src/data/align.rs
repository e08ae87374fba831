//! Calendar alignment: irregular daily levels to a gap-free weekly series.
//!
//! The raw table has no entry on weekends, holidays, and historical closures
//! (some spanning months). Alignment builds the complete daily calendar over
//! the window, joins it against the source, fills each gap by borrowing the
//! next available future observation, then samples one entry per week on the
//! anchor weekday. A closed anchor day therefore still yields an anchor-dated
//! row carrying the next trading day's level.
//!
//! Gap-fill is forward substitution, not carry-forward or interpolation: the
//! domain rule is "if markets were closed, use the next day's value".

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::data::source::PriceSource;
use crate::domain::{DailyObservation, WeeklyPoint, WeeklySeries};

/// Structured error types for alignment.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("invalid range: first date {first} is after last date {last}")]
    InvalidRange { first: NaiveDate, last: NaiveDate },

    #[error("empty series: alignment left {points} usable weekly point(s), need at least 2")]
    EmptySeries { points: usize },

    #[error("non-positive level {level} on {date}")]
    NonPositiveLevel { date: NaiveDate, level: f64 },
}

/// Bookkeeping from one alignment run, for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlignmentReport {
    /// Days in the calendar backbone (inclusive window).
    pub total_days: usize,
    /// Days with a level present in the source.
    pub observed_days: usize,
    /// Days whose level was borrowed from a later observation.
    pub filled_days: usize,
    /// Trailing days with no later observation to borrow from (dropped).
    pub dropped_trailing_days: usize,
    /// Anchor-weekday points in the final series.
    pub weekly_points: usize,
}

/// Build the weekly level series for `[first_date, last_date]`.
///
/// See [`build_weekly_series_with_report`]; this discards the report.
pub fn build_weekly_series<S: PriceSource>(
    source: &S,
    first_date: NaiveDate,
    last_date: NaiveDate,
    anchor_weekday: Weekday,
) -> Result<WeeklySeries, AlignError> {
    build_weekly_series_with_report(source, first_date, last_date, anchor_weekday)
        .map(|(series, _)| series)
}

/// Build the weekly level series plus the alignment report.
///
/// Steps:
/// 1. Generate the complete daily calendar from `first_date` to `last_date`
///    inclusive (the alignment backbone).
/// 2. Join each backbone day against the source.
/// 3. Fill each missing level with the nearest subsequent observed level.
///    A trailing run with nothing later to borrow from stays missing.
/// 4. Keep anchor-weekday days only.
/// 5. Drop still-missing entries and verify every level is positive.
///
/// Fails with [`AlignError::InvalidRange`] on a malformed window and
/// [`AlignError::EmptySeries`] when fewer than two weekly points survive.
pub fn build_weekly_series_with_report<S: PriceSource>(
    source: &S,
    first_date: NaiveDate,
    last_date: NaiveDate,
    anchor_weekday: Weekday,
) -> Result<(WeeklySeries, AlignmentReport), AlignError> {
    if first_date > last_date {
        return Err(AlignError::InvalidRange {
            first: first_date,
            last: last_date,
        });
    }

    // Steps 1 + 2: backbone and join.
    let mut days: Vec<DailyObservation> = first_date
        .iter_days()
        .take_while(|d| *d <= last_date)
        .map(|date| DailyObservation {
            date,
            level: source.lookup(date),
        })
        .collect();
    let observed_days = days.iter().filter(|o| !o.is_missing()).count();

    // Step 3: one reverse pass carries the next observed level backward, so
    // a run of consecutive gaps (even months long) chains to the nearest
    // subsequent observation rather than the next calendar day.
    let mut next_level: Option<f64> = None;
    for obs in days.iter_mut().rev() {
        match obs.level {
            Some(level) => next_level = Some(level),
            None => obs.level = next_level,
        }
    }
    let dropped_trailing_days = days.iter().filter(|o| o.is_missing()).count();
    let filled_days = days.len() - observed_days - dropped_trailing_days;

    // Steps 4 + 5: sample the anchor weekday, drop trailing-gap entries,
    // verify positivity (the estimator takes logarithms).
    let mut points = Vec::new();
    for obs in &days {
        if obs.date.weekday() != anchor_weekday {
            continue;
        }
        let Some(level) = obs.level else { continue };
        if level <= 0.0 {
            return Err(AlignError::NonPositiveLevel {
                date: obs.date,
                level,
            });
        }
        points.push(WeeklyPoint {
            date: obs.date,
            level,
        });
    }

    if points.len() < 2 {
        return Err(AlignError::EmptySeries {
            points: points.len(),
        });
    }

    let report = AlignmentReport {
        total_days: days.len(),
        observed_days,
        filled_days,
        dropped_trailing_days,
        weekly_points: points.len(),
    };
    Ok((WeeklySeries::from_points(points), report))
}
