mod calendar;
mod consts;
mod duration;
mod normalize;
mod prelude;
mod rows;
mod session;
mod snapshot;
mod storage;
#[cfg(test)]
mod test_utils;

pub use calendar::{days_in_month, is_leap_year};
pub use consts::*;
pub use duration::{CountingMode, duration_days, format_days, total_days};
pub use normalize::normalize;
pub use rows::{DateRangeRow, Field, RowId, RowStore};
pub use session::{Clipboard, ClipboardError, NoticeKind, Session};
pub use snapshot::{SaveError, SavedCalculation, SnapshotStore};
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::consts::{CENTURY_BASE, MAX_MONTH, MAX_YEAR, MIN_DAY};
use crate::prelude::*;
use std::str::FromStr;

/// A calendar date in the canonical `MM/DD/YY` short form, with the
/// two-digit year expanded into the 2000s. No time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}/{:02}/{:02}", month, day, "year - CENTURY_BASE")]
pub struct ShortDate {
    year: u16,
    month: u8,
    day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Not a canonical MM/DD/YY date: {_0}")]
    NonCanonical(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", CENTURY_BASE, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}/{year}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl ShortDate {
    /// Creates a date from already-expanded components, validating the
    /// year against the representable century, the month, and the day
    /// against the month's real length.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if year < CENTURY_BASE || year > MAX_YEAR {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > calendar::days_in_month(year, month) {
            return Err(ParseError::InvalidDay { month, day, year });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the year component (always in `2000..=2099` when parsed)
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Whole days from the century base to this date. Differences between
    /// two of these give elapsed day counts.
    pub(crate) const fn day_number(&self) -> i64 {
        calendar::day_number(self.year, self.month, self.day)
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str, canonical: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::NonCanonical(canonical.to_owned()))
    }
}

impl FromStr for ShortDate {
    type Err = ParseError;

    /// Normalizes the input first, then requires the canonical
    /// two-digit/two-digit/two-digit shape. `02/31/25` is rejected rather
    /// than rolled into March.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = normalize(s);
        if canonical.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let bytes = canonical.as_bytes();
        let shape_ok = bytes.len() == 8
            && bytes[2] == b'/'
            && bytes[5] == b'/'
            && [0usize, 1, 3, 4, 6, 7]
                .iter()
                .all(|&i| bytes[i].is_ascii_digit());
        if !shape_ok {
            return Err(ParseError::NonCanonical(canonical));
        }

        let month = Self::parse_u8(&canonical[0..2], &canonical)?;
        let day = Self::parse_u8(&canonical[3..5], &canonical)?;
        let yy = Self::parse_u8(&canonical[6..8], &canonical)?;

        Self::new(CENTURY_BASE + u16::from(yy), month, day)
    }
}

impl serde::Serialize for ShortDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ShortDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
