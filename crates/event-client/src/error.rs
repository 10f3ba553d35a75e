//! Error types for event-client operations.

use recurrence_engine::{EventId, RecurrenceError, SeriesId};
use thiserror::Error;

/// Failure reported by an [`EventApi`](crate::EventApi) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("No event in the batch matched a stored event")]
    NothingMatched,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Why a save was aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("Repeating event could not be expanded: {0}")]
    Expansion(#[from] RecurrenceError),

    /// The rule is well formed but yields no instance (seed after end date).
    #[error("Repeating event has no occurrences before its end date")]
    EmptySeries,

    #[error("Editing requires a persisted event id")]
    MissingId,

    #[error("No cached event belongs to series {0}")]
    UnknownSeries(SeriesId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
pub type Result<T> = std::result::Result<T, SaveError>;
