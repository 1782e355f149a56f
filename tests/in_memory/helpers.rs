//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use rstest::fixture;
use taskboard::{
    config::LimitsConfig,
    memory::InMemoryStore,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{CreateProjectRequest, ProjectManager},
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskManager},
};

/// Project manager over in-memory storage.
pub type TestProjectManager =
    ProjectManager<InMemoryProjectRepository, InMemoryTaskRepository, ManualClock>;

/// Task manager over in-memory storage.
pub type TestTaskManager =
    TaskManager<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Both managers sharing one pair of repositories and one clock.
pub struct Board {
    pub projects: TestProjectManager,
    pub tasks: TestTaskManager,
    pub task_repository: Arc<InMemoryTaskRepository>,
    pub clock: Arc<ManualClock>,
}

impl Board {
    /// Wires both managers with the given limits.
    pub fn with_limits(limits: LimitsConfig) -> Self {
        let store = InMemoryStore::new();
        let project_repository = Arc::new(InMemoryProjectRepository::new(store.clone()));
        let task_repository = Arc::new(InMemoryTaskRepository::new(store));
        let clock = Arc::new(ManualClock::new());
        Self {
            projects: ProjectManager::new(
                Arc::clone(&project_repository),
                Arc::clone(&task_repository),
                Arc::clone(&clock),
                limits,
            ),
            tasks: TaskManager::new(
                Arc::clone(&task_repository),
                project_repository,
                Arc::clone(&clock),
                limits,
            ),
            task_repository,
            clock,
        }
    }

    /// Creates a project with an empty description.
    ///
    /// # Errors
    ///
    /// Returns an error when the project manager rejects the request.
    pub async fn project(&self, name: &str) -> Result<Project, eyre::Report> {
        let project = self
            .projects
            .create(CreateProjectRequest::new(name, ""))
            .await?;
        Ok(project)
    }
}

/// Provides a board with the default limits.
#[fixture]
pub fn board() -> Board {
    Board::with_limits(LimitsConfig::default())
}
