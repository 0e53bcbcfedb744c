use std::time::Duration;

/// All two-digit years expand into this century.
pub const CENTURY_BASE: u16 = 2000;

/// Last year representable with a two-digit year.
pub const MAX_YEAR: u16 = CENTURY_BASE + 99;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator in the canonical `MM/DD/YY` form.
pub const DATE_SEPARATOR: char = '/';

/// Fixed key the durable record is stored under.
pub const STORAGE_KEY: &str = "timeCreditCalculator";

/// How long the save confirmation stays visible.
pub const SAVE_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// How long the copy confirmation stays visible.
pub const COPY_NOTICE_DURATION: Duration = Duration::from_millis(1500);
