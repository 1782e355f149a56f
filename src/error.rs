//! Caller-facing classification shared by every manager error.
//!
//! Both managers report failures through their own error enums; each of those
//! exposes a `kind()` that collapses the variant into one [`ErrorKind`], which
//! is what an HTTP layer or CLI dispatches on.

use serde::Serialize;
use std::fmt;

/// Category of a manager failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A text field exceeded its length limit.
    Validation,
    /// A status value was not one of `todo`, `doing`, `done`.
    InvalidStatus,
    /// A deadline string was not a valid `YYYY-MM-DD` date.
    InvalidDateFormat,
    /// A deadline was not strictly in the future.
    PastDeadline,
    /// The referenced project or task does not exist.
    NotFound,
    /// A project or per-project task cap was reached.
    LimitExceeded,
    /// Another project already uses the name.
    DuplicateName,
    /// The record changed concurrently and the write was rejected.
    Conflict,
    /// The storage backend failed.
    Storage,
}

impl ErrorKind {
    /// Returns the canonical snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidDateFormat => "invalid_date_format",
            Self::PastDeadline => "past_deadline",
            Self::NotFound => "not_found",
            Self::LimitExceeded => "limit_exceeded",
            Self::DuplicateName => "duplicate_name",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }

    /// Returns the HTTP status code an API layer should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Validation | Self::InvalidStatus | Self::InvalidDateFormat | Self::PastDeadline => {
                400
            }
            Self::LimitExceeded | Self::DuplicateName | Self::Conflict => 409,
            Self::Storage => 500,
        }
    }

    /// Returns `true` when the caller can fix the request and retry.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Storage)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
