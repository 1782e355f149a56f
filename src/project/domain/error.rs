//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name exceeds the 30-character limit.
    #[error("project name exceeds 30 character limit ({length} characters): {name}")]
    NameTooLong {
        /// Rejected name.
        name: String,
        /// Length of the rejected name in characters.
        length: usize,
    },

    /// The project description exceeds the 150-character limit.
    #[error("project description exceeds 150 character limit ({length} characters)")]
    DescriptionTooLong {
        /// Length of the rejected description in characters.
        length: usize,
    },
}
