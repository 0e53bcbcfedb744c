//! Normalization of loosely-formatted user text into the canonical
//! `MM/DD/YY` short-date form.

use crate::consts::DATE_SEPARATOR;

/// Rewrites arbitrary user text into `MM/DD/YY` where a rule applies.
///
/// Rules, first match wins:
/// 1. exactly 6 digits after stripping non-digits -> `MMDDYY`;
/// 2. exactly 8 digits -> `MMDDYYYY`, century dropped;
/// 3. slash- or dash-separated `M[/-]D[/-]YY[YY]`, components zero-padded
///    and a 4-digit year reduced to its last two digits;
/// 4. anything else passes through trimmed (possibly still non-canonical).
///
/// Whitespace-only input normalizes to the empty string. Never fails, and
/// `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        6 => return join_padded(&digits[0..2], &digits[2..4], &digits[4..6]),
        8 => return join_padded(&digits[0..2], &digits[2..4], &digits[6..8]),
        _ => {}
    }

    if let Some(canonical) = from_separated(trimmed) {
        return canonical;
    }

    trimmed.to_owned()
}

/// Handles the separated `M[/-]D[/-]YY[YY]` shape.
fn from_separated(trimmed: &str) -> Option<String> {
    let parts: Vec<&str> = trimmed.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let month = parts[0];
    let day = parts[1];
    let year = parts[2];

    if !is_digits(month, 1..=2) || !is_digits(day, 1..=2) {
        return None;
    }
    if !is_digits(year, 2..=2) && !is_digits(year, 4..=4) {
        return None;
    }

    let yy = &year[year.len() - 2..];
    Some(join_padded(month, day, yy))
}

fn is_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

fn join_padded(month: &str, day: &str, yy: &str) -> String {
    format!("{month:0>2}{DATE_SEPARATOR}{day:0>2}{DATE_SEPARATOR}{yy:0>2}")
}
