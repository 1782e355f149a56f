//! Repository port for project persistence and lookup.

use crate::{
    error::ErrorKind,
    project::domain::{Project, ProjectId, ProjectName},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project unless `max_projects` projects already exist.
    ///
    /// The cap check and the insert happen as one write, so concurrent
    /// callers cannot push the total past `max_projects`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::LimitReached`] when the cap is
    /// reached, [`ProjectRepositoryError::DuplicateName`] when the name is
    /// already taken, or [`ProjectRepositoryError::DuplicateProject`] when
    /// the ID already exists.
    async fn store(&self, project: &Project, max_projects: usize) -> ProjectRepositoryResult<()>;

    /// Persists the name and description of an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist or [`ProjectRepositoryError::DuplicateName`] when another
    /// project holds the new name.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by exact, case-sensitive name.
    ///
    /// Returns `None` when no project has the name.
    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects, newest first.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Removes a project together with any tasks that still belong to it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Returns the number of stored projects.
    async fn count(&self) -> ProjectRepositoryResult<usize>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project cap has been reached.
    #[error("maximum of {max} projects reached")]
    LimitReached {
        /// Configured project cap.
        max: usize,
    },

    /// A project with the same name already exists.
    #[error("project name '{0}' already exists")]
    DuplicateName(ProjectName),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for API and CLI callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::LimitReached { .. } => ErrorKind::LimitExceeded,
            Self::DuplicateProject(_) => ErrorKind::Conflict,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
