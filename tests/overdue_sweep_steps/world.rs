//! Shared world state for overdue sweep BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use rstest::fixture;
use taskboard::{
    config::LimitsConfig,
    memory::InMemoryStore,
    project::{
        adapters::memory::InMemoryProjectRepository, domain::Project, services::ProjectManager,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId},
        services::{TaskManager, TaskManagerError},
    },
};

/// Project manager type used by the BDD world.
pub type WorldProjectManager =
    ProjectManager<InMemoryProjectRepository, InMemoryTaskRepository, ManualClock>;

/// Task manager type used by the BDD world.
pub type WorldTaskManager =
    TaskManager<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Scenario world for overdue sweep behaviour tests.
pub struct SweepWorld {
    pub projects: WorldProjectManager,
    pub tasks: WorldTaskManager,
    pub clock: Arc<ManualClock>,
    pub project: Option<Project>,
    pub last_task: Option<Task>,
    pub created_task_ids: Vec<TaskId>,
    pub last_create_result: Option<Result<Task, TaskManagerError>>,
    pub last_sweep_count: Option<usize>,
}

impl SweepWorld {
    /// Creates a world with empty repositories and a clock at the start instant.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let project_repository = Arc::new(InMemoryProjectRepository::new(store.clone()));
        let task_repository = Arc::new(InMemoryTaskRepository::new(store));
        let clock = Arc::new(ManualClock::new());
        let limits = LimitsConfig::default();

        Self {
            projects: ProjectManager::new(
                Arc::clone(&project_repository),
                Arc::clone(&task_repository),
                Arc::clone(&clock),
                limits,
            ),
            tasks: TaskManager::new(task_repository, project_repository, Arc::clone(&clock), limits),
            clock,
            project: None,
            last_task: None,
            created_task_ids: Vec::new(),
            last_create_result: None,
            last_sweep_count: None,
        }
    }

    /// Returns the scenario project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the most recently created or changed task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn last_task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for SweepWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SweepWorld {
    SweepWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
