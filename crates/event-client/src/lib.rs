//! # event-client
//!
//! Client-side event operations for a calendar backend.
//!
//! Saving a new repeating event expands it with
//! [`recurrence_engine`] and submits the whole series in one bulk request;
//! everything else maps onto a single CRUD call. Results are reported to the
//! user through a [`Notifier`].
//!
//! ## Modules
//!
//! - [`api`] — the CRUD contract a backend implements
//! - [`memory`] — in-memory backend
//! - [`orchestrator`] — save/delete flows with notifications
//! - [`notify`] — notification severities and sinks
//! - [`error`] — Error types

pub mod api;
pub mod error;
pub mod memory;
pub mod notify;
pub mod orchestrator;

pub use api::EventApi;
pub use error::{ApiError, SaveError};
pub use memory::InMemoryEventApi;
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use orchestrator::{EventSaveOrchestrator, SaveMode, SaveOutcome};
