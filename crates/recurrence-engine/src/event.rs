//! Event instances and repeat rules.
//!
//! [`RepeatRule`] is a closed sum type: an unknown repeat kind cannot be
//! constructed in Rust code and is only reachable when decoding untrusted
//! JSON (see [`crate::wire`]).

use std::fmt;
use std::num::NonZeroU32;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

/// Opaque backend identifier of a persisted event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

/// Correlation id shared by every persisted instance of one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub String);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        SeriesId(s.to_string())
    }
}

/// The unit a repeat rule steps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatKind {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatKind::None => "none",
            RepeatKind::Daily => "daily",
            RepeatKind::Weekly => "weekly",
            RepeatKind::Monthly => "monthly",
            RepeatKind::Yearly => "yearly",
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RepeatKind {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RepeatKind::None),
            "daily" => Ok(RepeatKind::Daily),
            "weekly" => Ok(RepeatKind::Weekly),
            "monthly" => Ok(RepeatKind::Monthly),
            "yearly" => Ok(RepeatKind::Yearly),
            other => Err(RecurrenceError::UnknownRepeatKind(other.to_string())),
        }
    }
}

/// Step size and bound of a repeating rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    /// Number of units between two candidate dates.
    pub interval: NonZeroU32,
    /// Inclusive upper bound. `None` makes the series unbounded, which
    /// expansion refuses.
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    pub fn new(interval: NonZeroU32, end_date: Option<NaiveDate>) -> Self {
        Recurrence { interval, end_date }
    }

    /// Every `interval` units until `end_date` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidInterval`] for an interval of zero.
    pub fn every(interval: u32, end_date: NaiveDate) -> Result<Self, RecurrenceError> {
        let interval = NonZeroU32::new(interval).ok_or_else(|| {
            RecurrenceError::InvalidInterval("interval must be at least 1".to_string())
        })?;
        Ok(Recurrence::new(interval, Some(end_date)))
    }
}

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatRule {
    /// Not repeating: the event stands alone.
    #[default]
    None,
    Daily(Recurrence),
    Weekly(Recurrence),
    Monthly(Recurrence),
    Yearly(Recurrence),
}

impl RepeatRule {
    pub fn kind(&self) -> RepeatKind {
        match self {
            RepeatRule::None => RepeatKind::None,
            RepeatRule::Daily(_) => RepeatKind::Daily,
            RepeatRule::Weekly(_) => RepeatKind::Weekly,
            RepeatRule::Monthly(_) => RepeatKind::Monthly,
            RepeatRule::Yearly(_) => RepeatKind::Yearly,
        }
    }

    /// The interval and end date, or `None` for a non-repeating rule.
    pub fn recurrence(&self) -> Option<&Recurrence> {
        match self {
            RepeatRule::None => None,
            RepeatRule::Daily(r)
            | RepeatRule::Weekly(r)
            | RepeatRule::Monthly(r)
            | RepeatRule::Yearly(r) => Some(r),
        }
    }

    pub fn is_repeating(&self) -> bool {
        !matches!(self, RepeatRule::None)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.recurrence().and_then(|r| r.end_date)
    }

    /// Build a rule from its kind and payload.
    ///
    /// For [`RepeatKind::None`] the interval and end date are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidInterval`] if a repeating kind is
    /// given an interval of zero.
    pub fn from_parts(
        kind: RepeatKind,
        interval: u32,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, RecurrenceError> {
        if kind == RepeatKind::None {
            return Ok(RepeatRule::None);
        }
        let interval = NonZeroU32::new(interval).ok_or_else(|| {
            RecurrenceError::InvalidInterval(format!("{kind} rule needs an interval of at least 1"))
        })?;
        let recurrence = Recurrence::new(interval, end_date);
        Ok(match kind {
            RepeatKind::None => RepeatRule::None,
            RepeatKind::Daily => RepeatRule::Daily(recurrence),
            RepeatKind::Weekly => RepeatRule::Weekly(recurrence),
            RepeatKind::Monthly => RepeatRule::Monthly(recurrence),
            RepeatKind::Yearly => RepeatRule::Yearly(recurrence),
        })
    }
}

/// One concrete occurrence of an event.
///
/// Serializes through the backend's JSON shape (see [`crate::wire`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "crate::wire::WireEvent", into = "crate::wire::WireEvent")]
pub struct EventInstance {
    /// Backend id; `None` until the event is persisted.
    pub id: Option<EventId>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
    pub location: String,
    pub category: String,
    pub repeat: RepeatRule,
    /// Assigned by the backend when a series is bulk-created.
    pub series_id: Option<SeriesId>,
    /// Notification lead time in minutes.
    pub notification_minutes: u32,
}

impl EventInstance {
    /// A new, unsaved, non-repeating event with empty descriptive fields.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        EventInstance {
            id: None,
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatRule::None,
            series_id: None,
            notification_minutes: 10,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatRule) -> Self {
        self.repeat = repeat;
        self
    }

    /// Copy of this event moved to another date; every other field is kept.
    pub fn on(&self, date: NaiveDate) -> Self {
        EventInstance {
            date,
            ..self.clone()
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_repeating()
    }
}
