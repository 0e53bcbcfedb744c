//! Whole-day counts between the two endpoints of a row, under the two
//! legally distinct counting conventions.

use crate::ShortDate;
use crate::rows::DateRangeRow;
use serde::{Deserialize, Serialize};

/// Day-counting convention, selected globally by the user.
///
/// `TcjTdcj` counts both endpoints inclusively, so it always reads one day
/// higher than `StateJail` for the same parsed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CountingMode {
    #[default]
    StateJail,
    TcjTdcj,
}

/// Day count for a single row. Either endpoint failing to parse counts as
/// zero days; start/end order does not matter.
pub fn duration_days(row: &DateRangeRow, mode: CountingMode) -> i64 {
    let (Ok(start), Ok(end)) = (
        row.start().parse::<ShortDate>(),
        row.end().parse::<ShortDate>(),
    ) else {
        return 0;
    };

    let base = (end.day_number() - start.day_number()).abs();
    match mode {
        CountingMode::StateJail => base,
        CountingMode::TcjTdcj => base + 1,
    }
}

/// Sum of per-row day counts, the mode applied uniformly.
pub fn total_days(rows: &[DateRangeRow], mode: CountingMode) -> i64 {
    rows.iter().map(|row| duration_days(row, mode)).sum()
}

/// Formats a day count with thousands separators and the right plural.
pub fn format_days(n: i64) -> String {
    if n <= 0 {
        return "0 days".to_owned();
    }
    if n == 1 {
        return "1 day".to_owned();
    }
    format!("{} days", group_thousands(n))
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
