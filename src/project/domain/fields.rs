//! Validated text fields of a project.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum project name length in characters, matching `VARCHAR(30)`.
pub const MAX_NAME_LENGTH: usize = 30;

/// Maximum project description length in characters, matching `VARCHAR(150)`.
pub const MAX_DESCRIPTION_LENGTH: usize = 150;

/// Project name, unique across all projects.
///
/// Names are kept exactly as entered: uniqueness is case-sensitive and
/// surrounding whitespace is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NameTooLong`] when the value is longer
    /// than 30 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let name = value.into();
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::NameTooLong { name, length });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated project description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::DescriptionTooLong`] when the value is
    /// longer than 150 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let description = value.into();
        let length = description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ProjectDomainError::DescriptionTooLong { length });
        }
        Ok(Self(description))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
