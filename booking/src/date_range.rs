//! Whole-day date ranges and overlap arithmetic.
//!
//! A range covers every day from `from` to `to`, both ends included. Two
//! ranges that meet on the same day overlap; ranges on adjacent days do not.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Returns `true` if the inclusive ranges `[a_from, a_to]` and
/// `[b_from, b_to]` share at least one day.
///
/// # Examples
///
/// ```
/// use booking::date_range::overlaps;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
///
/// assert!(overlaps(d(3), d(5), d(5), d(7)));
/// assert!(!overlaps(d(3), d(5), d(6), d(8)));
/// ```
#[must_use]
pub fn overlaps(a_from: NaiveDate, a_to: NaiveDate, b_from: NaiveDate, b_to: NaiveDate) -> bool {
    !(a_to < b_from || a_from > b_to)
}

/// Returns `false` only when both bounds are present and `from` is after `to`.
///
/// # Examples
///
/// ```
/// use booking::date_range::is_valid_range;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
///
/// assert!(is_valid_range(Some(d(1)), Some(d(1))));
/// assert!(is_valid_range(None, Some(d(1))));
/// assert!(!is_valid_range(Some(d(2)), Some(d(1))));
/// ```
#[must_use]
pub fn is_valid_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from <= to,
        _ => true,
    }
}

/// A possibly incomplete inclusive day interval.
///
/// # Examples
///
/// ```
/// use booking::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
///
/// let held = DateRange::new(Some(d(3)), Some(d(5)));
/// assert!(held.overlaps(&DateRange::new(Some(d(4)), Some(d(6)))));
/// assert!(!held.overlaps(&DateRange::new(Some(d(6)), Some(d(8)))));
///
/// // Incomplete ranges never overlap anything
/// assert!(!held.overlaps(&DateRange::new(None, Some(d(4)))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from: Option<NaiveDate>,
    /// Last day of the range, inclusive.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Creates a complete range.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns both bounds if the range is complete.
    #[must_use]
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }

    /// Returns `true` when both bounds are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// See [`is_valid_range`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_range(self.from, self.to)
    }

    /// Returns `true` when both ranges are complete and share a day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((a_from, a_to)), Some((b_from, b_to))) => overlaps(a_from, a_to, b_from, b_to),
            _ => false,
        }
    }

    /// Returns the number of days covered, if the range is complete and valid.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        let (from, to) = self.bounds()?;
        if from > to {
            return None;
        }
        Some((to - from).num_days() + 1)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |date: Option<NaiveDate>| date.map_or_else(|| "?".to_string(), |d| d.to_string());
        write!(f, "{}..{}", side(self.from), side(self.to))
    }
}


#[cfg(test)]
mod proptests;
