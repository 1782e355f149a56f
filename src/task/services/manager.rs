//! Service layer for task creation, editing, status changes, and the overdue
//! sweep.

use crate::{
    config::LimitsConfig,
    error::ErrorKind,
    project::{
        domain::ProjectId,
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::{
        domain::{
            Deadline, DeadlineInput, ParseTaskStatusError, Task, TaskChanges, TaskDescription,
            TaskDomainError, TaskId, TaskStatus, TaskTitle,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for creating a task inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    deadline: Option<DeadlineInput>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: description.into(),
            deadline: None,
        }
    }

    /// Sets the deadline, either a `YYYY-MM-DD` string or an instant.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<DeadlineInput>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for a full task edit.
///
/// Every editable field is replaced. Leaving the deadline unset clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: String,
    description: String,
    status: String,
    deadline: Option<DeadlineInput>,
}

impl UpdateTaskRequest {
    /// Creates a request with the new title, description, and status.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
            deadline: None,
        }
    }

    /// Sets the deadline, either a `YYYY-MM-DD` string or an instant.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<DeadlineInput>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskManagerError {
    /// Field or deadline validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested status is not one of `todo`, `doing`, `done`.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The project the task should belong to does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project already holds the maximum number of tasks.
    #[error("project {project_id} already has the maximum of {max} tasks")]
    LimitExceeded {
        /// Project that is full.
        project_id: ProjectId,
        /// Configured per-project task cap.
        max: usize,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project repository lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

impl TaskManagerError {
    /// Classifies the error for API and CLI callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(
                TaskDomainError::TitleTooLong { .. } | TaskDomainError::DescriptionTooLong { .. },
            ) => ErrorKind::Validation,
            Self::Domain(TaskDomainError::InvalidDateFormat(_)) => ErrorKind::InvalidDateFormat,
            Self::Domain(TaskDomainError::PastDeadline { .. }) => ErrorKind::PastDeadline,
            Self::InvalidStatus(_) => ErrorKind::InvalidStatus,
            Self::NotFound(_) | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::Repository(err) => err.kind(),
            Self::ProjectRepository(err) => err.kind(),
        }
    }
}

/// Result type for task manager operations.
pub type TaskManagerResult<T> = Result<T, TaskManagerError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskManager<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    limits: LimitsConfig,
}

impl<T, P, C> TaskManager<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task manager.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>, limits: LimitsConfig) -> Self {
        Self {
            tasks,
            projects,
            clock,
            limits,
        }
    }

    /// Creates a `todo` task in an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Domain`] for oversized fields, malformed
    /// or past deadlines, [`TaskManagerError::ProjectNotFound`] when the
    /// project does not exist, [`TaskManagerError::LimitExceeded`] when the
    /// project is full, or a repository error when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskManagerResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            deadline,
        } = request;
        let task_title = TaskTitle::new(title)?;
        let task_description = TaskDescription::new(description)?;
        let task_deadline = deadline
            .map(|input| Deadline::from_input(&input, &*self.clock))
            .transpose()?;

        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(TaskManagerError::ProjectNotFound(project_id));
        }
        let task = Task::new(
            project_id,
            task_title,
            task_description,
            task_deadline,
            &*self.clock,
        );
        self.tasks
            .store(&task, self.limits.max_tasks_per_project)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::ProjectNotFound(missing) => {
                    TaskManagerError::ProjectNotFound(missing)
                }
                TaskRepositoryError::LimitReached { project_id, max } => {
                    TaskManagerError::LimitExceeded { project_id, max }
                }
                other => TaskManagerError::Repository(other),
            })?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskManagerResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskManagerError::NotFound(id))
    }

    /// Returns the tasks of a project, newest first.
    ///
    /// An unknown project yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when persistence lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskManagerResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Moves a task to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::InvalidStatus`] for unknown statuses,
    /// [`TaskManagerError::NotFound`] when the task does not exist, or
    /// [`TaskRepositoryError::Conflict`] when the task changed concurrently.
    pub async fn update_status(&self, id: TaskId, status: &str) -> TaskManagerResult<Task> {
        let new_status = TaskStatus::try_from(status)?;
        let mut task = self.get(id).await?;
        task.set_status(new_status, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Replaces a task's title, description, status, and deadline.
    ///
    /// A deadline equal to the task's current one is kept even if it has
    /// already passed; any other deadline must lie in the future.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Self::create`] plus
    /// [`TaskManagerError::InvalidStatus`], [`TaskManagerError::NotFound`]
    /// when the task does not exist, or [`TaskRepositoryError::Conflict`] when
    /// the task changed concurrently.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskManagerResult<Task> {
        let UpdateTaskRequest {
            title,
            description,
            status,
            deadline,
        } = request;
        let task_title = TaskTitle::new(title)?;
        let task_description = TaskDescription::new(description)?;
        let task_status = TaskStatus::try_from(status.as_str())?;
        let requested_deadline = deadline.map(|input| input.resolve()).transpose()?;

        let mut task = self.get(id).await?;
        let task_deadline = match requested_deadline {
            None => None,
            Some(at) if task.deadline().is_some_and(|current| current.at() == at) => {
                task.deadline()
            }
            Some(at) => Some(Deadline::new(at, &*self.clock)?),
        };

        task.apply_changes(
            TaskChanges {
                title: task_title,
                description: task_description,
                status: task_status,
                deadline: task_deadline,
            },
            &*self.clock,
        );
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskManagerResult<()> {
        self.tasks.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskManagerError::NotFound(missing),
            other => TaskManagerError::Repository(other),
        })
    }

    /// Closes every task whose deadline has passed and that is not done.
    ///
    /// Each task is closed through a conditional write, so tasks completed or
    /// rescheduled after the scan are left alone. A failure on one task is
    /// logged and the sweep moves on; the returned count only includes tasks
    /// that were actually closed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when the overdue scan itself
    /// fails.
    pub async fn sweep_overdue(&self) -> TaskManagerResult<usize> {
        let now = self.clock.utc();
        let overdue = self.tasks.list_overdue(now).await?;
        let candidates = overdue.len();

        let mut closed = 0_usize;
        for task in overdue {
            let task_id = task.id();
            match self.tasks.close_if_overdue(task_id, now).await {
                Ok(true) => closed += 1,
                Ok(false) => debug!(%task_id, "task no longer overdue, skipped"),
                Err(TaskRepositoryError::NotFound(_)) => {
                    debug!(%task_id, "overdue task deleted before closing, skipped");
                }
                Err(err) => warn!(%task_id, error = %err, "failed to close overdue task"),
            }
        }

        debug!(candidates, closed, "overdue sweep finished");
        Ok(closed)
    }
}
