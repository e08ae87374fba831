//! WeeklySeries — the gap-free weekly level series consumed by the estimator.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// One sampled weekly observation: anchor-weekday date and a positive level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub date: NaiveDate,
    pub level: f64,
}

/// Ordered weekly level series with no missing values.
///
/// Invariants (enforced by the aligner, the only construction site):
/// - dates strictly increasing, spaced by whole weeks
/// - every date falls on the same anchor weekday
/// - every level is present and > 0 (the estimator takes logarithms)
///
/// Read-only after construction; the estimator borrows it any number of
/// times for different horizons.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySeries {
    points: Vec<WeeklyPoint>,
}

impl WeeklySeries {
    /// Construct from already-validated points. Callers must uphold the
    /// series invariants; only the aligner and in-crate tests do this.
    pub(crate) fn from_points(points: Vec<WeeklyPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[WeeklyPoint] {
        &self.points
    }

    /// The date axis, in series order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// The level values, in series order.
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.level)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeeklyPoint> {
        self.points.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// The weekday every entry falls on.
    pub fn anchor_weekday(&self) -> Option<Weekday> {
        self.points.first().map(|p| p.date.weekday())
    }
}

impl<'a> IntoIterator for &'a WeeklySeries {
    type Item = &'a WeeklyPoint;
    type IntoIter = std::slice::Iter<'a, WeeklyPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
