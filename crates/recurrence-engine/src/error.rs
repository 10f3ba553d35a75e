//! Error types for recurrence-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule asks for repetition but has no end date to bound it.
    #[error("Cannot expand an unbounded series: repeat rule has no end date")]
    MissingEndDate,

    #[error("Unknown repeat kind: '{0}'")]
    UnknownRepeatKind(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
