//! Domain model for projects.
//!
//! Field validation lives in the value types so that a constructed
//! [`Project`] always satisfies the length rules.

mod error;
mod fields;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use fields::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, ProjectDescription, ProjectName};
pub use ids::ProjectId;
pub use project::{PersistedProjectData, Project};
