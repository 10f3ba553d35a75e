//! RFC 5545 rendering of repeat rules.
//!
//! RFC 5545 ignores recurrence instances that fall on invalid dates, which is
//! the same skip policy the expander applies to monthly and yearly rules, so
//! a rendered rule expands to the same dates in any conforming calendar.

use chrono::NaiveDate;

use crate::event::RepeatRule;

/// Render `rule` anchored at `seed_date` as a `DTSTART` / `RRULE` pair.
///
/// Dates are written as UTC midnight. Returns `None` for a non-repeating
/// rule. An unbounded rule renders without `UNTIL`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use recurrence_engine::{to_rrule, Recurrence, RepeatRule};
///
/// let seed = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let rule = RepeatRule::Weekly(Recurrence::every(2, end).unwrap());
///
/// assert_eq!(
///     to_rrule(seed, &rule).unwrap(),
///     "DTSTART:20250701T000000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=20250901T000000Z",
/// );
/// ```
pub fn to_rrule(seed_date: NaiveDate, rule: &RepeatRule) -> Option<String> {
    let freq = match rule {
        RepeatRule::None => return None,
        RepeatRule::Daily(_) => "DAILY",
        RepeatRule::Weekly(_) => "WEEKLY",
        RepeatRule::Monthly(_) => "MONTHLY",
        RepeatRule::Yearly(_) => "YEARLY",
    };
    let recurrence = rule.recurrence()?;

    let mut out = format!(
        "DTSTART:{}\nRRULE:FREQ={};INTERVAL={}",
        ical_utc(seed_date),
        freq,
        recurrence.interval
    );
    if let Some(end) = recurrence.end_date {
        out.push_str(&format!(";UNTIL={}", ical_utc(end)));
    }
    Some(out)
}

fn ical_utc(date: NaiveDate) -> String {
    date.format("%Y%m%dT000000Z").to_string()
}
