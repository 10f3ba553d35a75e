//! Repeating event expansion.
//!
//! Turns one seed event plus a [`RepeatRule`] into the ordered list of dated
//! instances of the series, from the seed date up to the rule's inclusive
//! end date.
//!
//! # Stepping
//!
//! - **Daily / weekly**: every `interval` days (or `7 * interval` days).
//!   Every step lands on a real date, so every step produces an instance.
//! - **Monthly / yearly**: every `interval` months (or years), keeping the
//!   seed's day of month. A candidate month that has no such day (the 31st
//!   of a 30-day month, February 29 in a common year) produces nothing:
//!   it is skipped, never clamped to the last day and never rolled into the
//!   following month.
//!
//! # Bounds
//!
//! Expansion refuses unbounded rules ([`RecurrenceError::MissingEndDate`]),
//! so the number of candidates is always at most
//! `(end_date - seed_date) / interval + 1`.

use std::num::NonZeroU32;

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::{date_if_valid, shift_month};
use crate::error::RecurrenceError;
use crate::event::{EventInstance, RepeatRule};

/// Expand `seed` under `rule` into the full list of instances.
///
/// Every produced instance is a copy of `seed` with only `date` changed.
///
/// # Errors
///
/// Returns [`RecurrenceError::MissingEndDate`] if `rule` repeats without an
/// end date. An empty result (seed after the end date) is not an error.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use recurrence_engine::{expand, EventInstance, Recurrence, RepeatRule};
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let seed = EventInstance::new(
///     "Rent",
///     date(2025, 1, 31),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
/// );
/// let rule = RepeatRule::Monthly(Recurrence::every(1, date(2025, 5, 31)).unwrap());
///
/// let dates: Vec<_> = expand(&seed, &rule).unwrap().iter().map(|e| e.date).collect();
/// assert_eq!(dates, vec![date(2025, 1, 31), date(2025, 3, 31), date(2025, 5, 31)]);
/// ```
pub fn expand(
    seed: &EventInstance,
    rule: &RepeatRule,
) -> Result<Vec<EventInstance>, RecurrenceError> {
    if !rule.is_repeating() {
        return Ok(vec![seed.clone()]);
    }

    let instances: Vec<EventInstance> = occurrences(seed.date, rule)?
        .map(|date| seed.on(date))
        .collect();

    tracing::debug!(
        kind = %rule.kind(),
        seed = %seed.date,
        instances = instances.len(),
        "expanded repeating event"
    );
    Ok(instances)
}

/// Expand `seed` under its own `repeat` rule.
///
/// # Errors
///
/// Same as [`expand`].
pub fn expand_event(seed: &EventInstance) -> Result<Vec<EventInstance>, RecurrenceError> {
    expand(seed, &seed.repeat)
}

/// The dates of the series starting at `seed_date`, collected.
///
/// # Errors
///
/// Same as [`expand`].
pub fn expand_dates(
    seed_date: NaiveDate,
    rule: &RepeatRule,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    Ok(occurrences(seed_date, rule)?.collect())
}

/// Lazy iterator over the dates of the series starting at `seed_date`.
///
/// For [`RepeatRule::None`] it yields `seed_date` once.
///
/// # Errors
///
/// Returns [`RecurrenceError::MissingEndDate`] for an unbounded rule.
pub fn occurrences(
    seed_date: NaiveDate,
    rule: &RepeatRule,
) -> Result<Occurrences, RecurrenceError> {
    let (step, recurrence) = match rule {
        RepeatRule::None => {
            return Ok(Occurrences {
                seed: seed_date,
                end: seed_date,
                step: Step::Once,
                index: 0,
                done: false,
            })
        }
        RepeatRule::Daily(r) => (Step::Days(u64::from(r.interval.get())), r),
        RepeatRule::Weekly(r) => (Step::Days(7 * u64::from(r.interval.get())), r),
        RepeatRule::Monthly(r) => (Step::Months(r.interval), r),
        RepeatRule::Yearly(r) => (Step::Years(r.interval), r),
    };

    let end = recurrence.end_date.ok_or(RecurrenceError::MissingEndDate)?;

    Ok(Occurrences {
        seed: seed_date,
        end,
        step,
        index: 0,
        done: false,
    })
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Once,
    Days(u64),
    Months(NonZeroU32),
    Years(NonZeroU32),
}

/// What the `index`-th candidate of a series turned out to be.
enum Candidate {
    /// A real date (which may still lie past the end date).
    Date(NaiveDate),
    /// The candidate month/year has no such day; try the next one.
    Skipped { past_end: bool },
    /// Stepping ran off the representable calendar.
    Overflow,
}

/// Iterator over the dates of one series, in strictly increasing order.
///
/// Created by [`occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences {
    seed: NaiveDate,
    end: NaiveDate,
    step: Step,
    index: u64,
    done: bool,
}

impl Occurrences {
    fn candidate(&self) -> Candidate {
        let k = self.index;
        match self.step {
            Step::Once => Candidate::Date(self.seed),
            Step::Days(days) => match days
                .checked_mul(k)
                .and_then(|n| self.seed.checked_add_days(Days::new(n)))
            {
                Some(date) => Candidate::Date(date),
                None => Candidate::Overflow,
            },
            Step::Months(interval) => {
                let Some((year, month)) = u64::from(interval.get())
                    .checked_mul(k)
                    .and_then(|n| shift_month(self.seed.year(), self.seed.month(), n))
                else {
                    return Candidate::Overflow;
                };
                match date_if_valid(year, month, self.seed.day()) {
                    Some(date) => Candidate::Date(date),
                    None => Candidate::Skipped {
                        past_end: (year, month) > (self.end.year(), self.end.month()),
                    },
                }
            }
            Step::Years(interval) => {
                let Some(year) = i64::from(interval.get())
                    .checked_mul(k as i64)
                    .and_then(|n| i64::from(self.seed.year()).checked_add(n))
                    .and_then(|y| i32::try_from(y).ok())
                else {
                    return Candidate::Overflow;
                };
                match date_if_valid(year, self.seed.month(), self.seed.day()) {
                    Some(date) => Candidate::Date(date),
                    None => Candidate::Skipped {
                        past_end: year > self.end.year(),
                    },
                }
            }
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            let candidate = self.candidate();
            self.index += 1;
            if matches!(self.step, Step::Once) {
                self.done = true;
            }

            match candidate {
                Candidate::Date(date) if date <= self.end => return Some(date),
                Candidate::Date(_) | Candidate::Overflow => self.done = true,
                Candidate::Skipped { past_end: true } => self.done = true,
                Candidate::Skipped { past_end: false } => {
                    tracing::trace!(
                        index = self.index - 1,
                        "candidate date does not exist, skipped"
                    );
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Occurrences {}
