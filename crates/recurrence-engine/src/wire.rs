//! JSON wire format of the events backend.
//!
//! The backend speaks camelCase JSON with string dates (`YYYY-MM-DD`),
//! string times (`HH:MM`) and an open `repeat.type` string. Decoding is the
//! one place where an unknown repeat kind can appear; it is rejected here
//! with [`RecurrenceError::UnknownRepeatKind`] so the typed model never has
//! to represent it.

use serde::{Deserialize, Serialize};

use crate::calendar::{format_date, format_time, parse_date, parse_end_date, parse_time};
use crate::error::RecurrenceError;
use crate::event::{EventId, EventInstance, RepeatKind, RepeatRule, SeriesId};

/// `repeat` object as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRepeat {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Event object as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    pub repeat: WireRepeat,
    #[serde(default)]
    pub notification_time: u32,
}

impl TryFrom<WireRepeat> for RepeatRule {
    type Error = RecurrenceError;

    fn try_from(raw: WireRepeat) -> Result<Self, Self::Error> {
        let kind: RepeatKind = raw.kind.parse()?;
        if kind == RepeatKind::None {
            return Ok(RepeatRule::None);
        }
        let end_date = raw.end_date.as_deref().map(parse_end_date).transpose()?;
        RepeatRule::from_parts(kind, raw.interval, end_date)
    }
}

impl TryFrom<WireEvent> for EventInstance {
    type Error = RecurrenceError;

    fn try_from(raw: WireEvent) -> Result<Self, Self::Error> {
        let series_id = raw.repeat.id.clone().map(SeriesId);
        Ok(EventInstance {
            id: raw.id.map(EventId),
            date: parse_date(&raw.date)?,
            start_time: parse_time(&raw.start_time)?,
            end_time: parse_time(&raw.end_time)?,
            repeat: RepeatRule::try_from(raw.repeat)?,
            series_id,
            title: raw.title,
            description: raw.description,
            location: raw.location,
            category: raw.category,
            notification_minutes: raw.notification_time,
        })
    }
}

impl From<EventInstance> for WireEvent {
    fn from(event: EventInstance) -> Self {
        let (interval, end_date) = match event.repeat.recurrence() {
            Some(r) => (r.interval.get(), r.end_date.map(format_date)),
            None => (0, None),
        };
        WireEvent {
            id: event.id.map(|id| id.0),
            date: format_date(event.date),
            start_time: format_time(event.start_time),
            end_time: format_time(event.end_time),
            repeat: WireRepeat {
                kind: event.repeat.kind().as_str().to_string(),
                interval,
                end_date,
                id: event.series_id.map(|id| id.0),
            },
            title: event.title,
            description: event.description,
            location: event.location,
            category: event.category,
            notification_time: event.notification_minutes,
        }
    }
}
