//! Shared constructors for unit tests.
#![allow(clippy::unwrap_used)]

use crate::ShortDate;
use crate::rows::{DateRangeRow, RowId};

pub(crate) fn date(year: u16, month: u8, day: u8) -> ShortDate {
    ShortDate::new(year, month, day).unwrap()
}

pub(crate) fn row(id: u64, start: &str, end: &str) -> DateRangeRow {
    DateRangeRow::from_parts(RowId::new(id), start, end)
}
