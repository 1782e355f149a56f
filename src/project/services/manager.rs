//! Service layer for project creation, renaming, and cascading deletion.

use crate::{
    config::LimitsConfig,
    error::ErrorKind,
    project::{
        domain::{Project, ProjectDescription, ProjectDomainError, ProjectId, ProjectName},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with the project name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request payload for replacing a project's name and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: String,
    description: String,
}

impl UpdateProjectRequest {
    /// Creates a request with the new name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectManagerError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The project cap has been reached.
    #[error("maximum of {max} projects reached")]
    LimitExceeded {
        /// Configured project cap.
        max: usize,
    },

    /// Another project already uses the name.
    #[error("project name '{0}' already exists")]
    DuplicateName(ProjectName),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Task repository operation failed while counting or cascading.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

impl ProjectManagerError {
    /// Classifies the error for API and CLI callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::Repository(err) => err.kind(),
            Self::TaskRepository(err) => err.kind(),
        }
    }
}

/// Result type for project manager operations.
pub type ProjectManagerResult<T> = Result<T, ProjectManagerError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectManager<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    limits: LimitsConfig,
}

impl<P, T, C> ProjectManager<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project manager.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>, limits: LimitsConfig) -> Self {
        Self {
            projects,
            tasks,
            clock,
            limits,
        }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::Domain`] when a field is too long,
    /// [`ProjectManagerError::LimitExceeded`] when the project cap is reached,
    /// [`ProjectManagerError::DuplicateName`] when the name is taken, or a
    /// repository error when persistence fails.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectManagerResult<Project> {
        let CreateProjectRequest { name, description } = request;
        let project_name = ProjectName::new(name)?;
        let project_description = ProjectDescription::new(description)?;

        let project = Project::new(project_name, project_description, &*self.clock);
        self.projects
            .store(&project, self.limits.max_projects)
            .await
            .map_err(|err| match err {
                ProjectRepositoryError::LimitReached { max } => {
                    ProjectManagerError::LimitExceeded { max }
                }
                ProjectRepositoryError::DuplicateName(name) => {
                    ProjectManagerError::DuplicateName(name)
                }
                other => ProjectManagerError::Repository(other),
            })?;
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::NotFound`] when the project does not
    /// exist.
    pub async fn get(&self, id: ProjectId) -> ProjectManagerResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectManagerError::NotFound(id))
    }

    /// Returns all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> ProjectManagerResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }

    /// Replaces a project's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::Domain`] when a field is too long,
    /// [`ProjectManagerError::NotFound`] when the project does not exist, or
    /// [`ProjectManagerError::DuplicateName`] when a different project holds
    /// the new name.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectManagerResult<Project> {
        let UpdateProjectRequest { name, description } = request;
        let project_name = ProjectName::new(name)?;
        let project_description = ProjectDescription::new(description)?;

        let mut project = self.get(id).await?;
        let holder = self.projects.find_by_name(&project_name).await?;
        if holder.is_some_and(|existing| existing.id() != id) {
            return Err(ProjectManagerError::DuplicateName(project_name));
        }

        project.rename(project_name, project_description);
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Deletes a project together with all of its tasks.
    ///
    /// Tasks are removed before the project so an interrupted deletion never
    /// leaves tasks pointing at a missing project. Removing the project also
    /// drops any task stored for it in the meantime. Returns the number of
    /// tasks removed by the first pass.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::NotFound`] when the project does not
    /// exist, or a repository error when either deletion fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectManagerResult<usize> {
        let project = self.get(id).await?;
        let removed_tasks = self.tasks.delete_by_project(id).await?;
        self.projects.delete(id).await?;
        info!(
            project_id = %id,
            project_name = %project.name(),
            removed_tasks,
            "project deleted"
        );
        Ok(removed_tasks)
    }

    /// Returns the number of tasks belonging to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectManagerError::TaskRepository`] when the count fails.
    pub async fn task_count(&self, id: ProjectId) -> ProjectManagerResult<usize> {
        Ok(self.tasks.count_by_project(id).await?)
    }
}
