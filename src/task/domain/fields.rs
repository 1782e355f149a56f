//! Validated text fields of a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum task title length in characters, matching `VARCHAR(30)`.
pub const MAX_TITLE_LENGTH: usize = 30;

/// Maximum task description length in characters, matching `VARCHAR(150)`.
pub const MAX_DESCRIPTION_LENGTH: usize = 150;

/// Task title, kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooLong`] when the value is longer than
    /// 30 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let title = value.into();
        let length = title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong { title, length });
        }
        Ok(Self(title))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when the value is longer
    /// than 150 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let description = value.into();
        let length = description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong { length });
        }
        Ok(Self(description))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
