//! Calendar arithmetic on date-only and time-only values.
//!
//! Everything here works on pure calendar dates: no timezone, no instant,
//! no system clock. Month lengths come from an exact table with the
//! Gregorian leap-year rule, and impossible dates (February 30, April 31,
//! February 29 in a common year) are reported as `None` rather than being
//! rolled over into the following month.

use chrono::{NaiveDate, NaiveTime};

use crate::error::RecurrenceError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for wall-clock times.
pub const TIME_FORMAT: &str = "%H:%M";

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// ── Month lengths ───────────────────────────────────────────────────────────

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
///
/// Returns `None` for a month outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let base = *DAYS_IN_MONTH.get(month.checked_sub(1)? as usize)?;
    if month == 2 && is_leap_year(year) {
        Some(base + 1)
    } else {
        Some(base)
    }
}

/// Build a date only if `day` exists in the given month.
///
/// Unlike naive "add a month" arithmetic this never rolls January 31 into
/// March: a day past the end of the month yields `None`.
///
/// # Examples
///
/// ```
/// use recurrence_engine::calendar::date_if_valid;
///
/// assert!(date_if_valid(2024, 2, 29).is_some());
/// assert!(date_if_valid(2025, 2, 29).is_none());
/// assert!(date_if_valid(2025, 4, 31).is_none());
/// ```
pub fn date_if_valid(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if day == 0 || day > days_in_month(year, month)? {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Shift a (year, month) pair by `months`, carrying into the year.
///
/// Returns `None` on year overflow.
pub(crate) fn shift_month(year: i32, month: u32, months: u64) -> Option<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1;
    let shifted = index.checked_add(i64::try_from(months).ok()?)?;
    let year = i32::try_from(shifted.div_euclid(12)).ok()?;
    let month = u32::try_from(shifted.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

// ── Parsing & formatting ────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidDate`] if the string is not a real date.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecurrenceError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| RecurrenceError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse an inclusive `YYYY-MM-DD` end bound.
///
/// A day that does not exist in its month but is at most 31 resolves to the
/// month's last day, which bounds a series exactly like the literal date
/// would.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidDate`] for anything else `parse_date`
/// rejects.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use recurrence_engine::calendar::parse_end_date;
///
/// assert_eq!(
///     parse_end_date("2030-02-29").unwrap(),
///     NaiveDate::from_ymd_opt(2030, 2, 28).unwrap()
/// );
/// assert!(parse_end_date("2030-02-32").is_err());
/// ```
pub fn parse_end_date(s: &str) -> Result<NaiveDate, RecurrenceError> {
    parse_date(s).or_else(|err| last_day_for(s).ok_or(err))
}

fn last_day_for(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let last = days_in_month(year, month)?;
    if !(1..=31).contains(&day) {
        return None;
    }
    date_if_valid(year, month, day.min(last))
}

/// Parse an `HH:MM` (or `HH:MM:SS`) wall-clock time.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidTime`] if the string is not a valid time.
pub fn parse_time(s: &str) -> Result<NaiveTime, RecurrenceError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| RecurrenceError::InvalidTime(format!("'{}': {}", s, e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
