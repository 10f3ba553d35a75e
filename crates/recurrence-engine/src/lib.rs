//! # recurrence-engine
//!
//! Deterministic expansion of repeating calendar events.
//!
//! A repeating event is authored once (the *seed*) together with a repeat
//! rule: daily, weekly, monthly or yearly, an interval and an inclusive end
//! date. The engine turns that into the exact list of dated instances,
//! handling month-length variation and leap years without ever rolling an
//! impossible date into the next month.
//!
//! ## Modules
//!
//! - [`expander`] — seed event + repeat rule → ordered list of dated instances
//! - [`event`] — event instances, repeat rules, ids
//! - [`calendar`] — month lengths, leap years, date/time parsing
//! - [`wire`] — backend JSON format, decoding untrusted repeat kinds
//! - [`ical`] — RFC 5545 `RRULE` rendering of repeat rules
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod event;
pub mod expander;
pub mod ical;
pub mod wire;

pub use error::RecurrenceError;
pub use event::{EventId, EventInstance, Recurrence, RepeatKind, RepeatRule, SeriesId};
pub use expander::{expand, expand_dates, expand_event, occurrences, Occurrences};
pub use ical::to_rrule;
pub use wire::{WireEvent, WireRepeat};
