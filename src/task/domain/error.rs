//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title exceeds the 30-character limit.
    #[error("task title exceeds 30 character limit ({length} characters): {title}")]
    TitleTooLong {
        /// Rejected title.
        title: String,
        /// Length of the rejected title in characters.
        length: usize,
    },

    /// The task description exceeds the 150-character limit.
    #[error("task description exceeds 150 character limit ({length} characters)")]
    DescriptionTooLong {
        /// Length of the rejected description in characters.
        length: usize,
    },

    /// The deadline is not a `YYYY-MM-DD` calendar date.
    #[error("invalid deadline '{0}', expected a date in YYYY-MM-DD format")]
    InvalidDateFormat(String),

    /// The deadline is not strictly after the current time.
    #[error("deadline {deadline} is not in the future (now {now})")]
    PastDeadline {
        /// Rejected deadline.
        deadline: DateTime<Utc>,
        /// Clock time the deadline was checked against.
        now: DateTime<Utc>,
    },
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status '{0}', expected one of: todo, doing, done")]
pub struct ParseTaskStatusError(pub String);
