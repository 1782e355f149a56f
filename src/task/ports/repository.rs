//! Repository port for task persistence, lookup, and the overdue sweep.

use crate::{
    error::ErrorKind,
    project::domain::ProjectId,
    task::domain::{Task, TaskId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task in its project unless the project already holds
    /// `max_per_project` tasks.
    ///
    /// The project check, the cap check, and the insert happen as one write,
    /// so a task is never stored for a project that is being deleted and
    /// concurrent callers cannot push the project past its cap.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the project does
    /// not exist, [`TaskRepositoryError::LimitReached`] when the project is
    /// full, or [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task, max_per_project: usize) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// The write only succeeds when the stored revision is exactly one behind
    /// `task.revision()`, i.e. nobody else wrote the task since it was read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::Conflict`] when the stored revision differs.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a project, newest first.
    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Removes every task of a project and returns how many were removed.
    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Returns the number of tasks in a project.
    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Returns tasks that are not done and whose deadline is before `now`.
    async fn list_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Atomically closes a task if it is still overdue at `now`.
    ///
    /// Sets the status to done, `closed_at` to `now`, and advances the
    /// revision. Returns `false` when the task no longer qualifies (already
    /// done, deadline moved or cleared).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn close_if_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The project the task should belong to does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project already holds the maximum number of tasks.
    #[error("project {project_id} already has the maximum of {max} tasks")]
    LimitReached {
        /// Project that is full.
        project_id: ProjectId,
        /// Configured per-project task cap.
        max: usize,
    },

    /// The task was changed by someone else since it was read.
    #[error("task {id} was modified concurrently (expected stored revision {expected})")]
    Conflict {
        /// Task identifier.
        id: TaskId,
        /// Revision the writer expected to replace.
        expected: u64,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
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
            Self::NotFound(_) | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::LimitReached { .. } => ErrorKind::LimitExceeded,
            Self::DuplicateTask(_) | Self::Conflict { .. } => ErrorKind::Conflict,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Storage,
        }
    }
}
