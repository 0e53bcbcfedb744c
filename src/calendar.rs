//! Gregorian calendar helpers shared by parsing and day-count arithmetic.

use crate::consts::{
    CENTURY_BASE, CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH,
};

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whole days from `CENTURY_BASE`-01-01 to the given date.
///
/// The representable span is a single century, so a plain accumulation
/// is cheap and keeps the leap rules in one place.
pub(crate) const fn day_number(year: u16, month: u8, day: u8) -> i64 {
    debug_assert!(year >= CENTURY_BASE);
    debug_assert!(month != 0 && month <= MAX_MONTH);

    let mut days: i64 = 0;
    let mut y = CENTURY_BASE;
    while y < year {
        days += if is_leap_year(y) { 366 } else { 365 };
        y += 1;
    }
    let mut m = 1;
    while m < month {
        days += days_in_month(year, m) as i64;
        m += 1;
    }
    days + day as i64 - 1
}
