//! Unit tests for task management and the overdue sweep.


use std::sync::Arc;

use crate::{
    config::LimitsConfig,
    memory::InMemoryStore,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectDescription, ProjectName},
        ports::ProjectRepository,
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskManager},
    test_utils::ManualClock,
};

type TestManager = TaskManager<InMemoryTaskRepository, InMemoryProjectRepository, ManualClock>;

/// Task manager wired to in-memory repositories and a manual clock.
struct Harness {
    manager: TestManager,
    tasks: Arc<InMemoryTaskRepository>,
    projects: Arc<InMemoryProjectRepository>,
    clock: Arc<ManualClock>,
    limits: LimitsConfig,
}

impl Harness {
    fn new(limits: LimitsConfig) -> Self {
        let store = InMemoryStore::new();
        let tasks = Arc::new(InMemoryTaskRepository::new(store.clone()));
        let projects = Arc::new(InMemoryProjectRepository::new(store));
        let clock = Arc::new(ManualClock::new());
        let manager = TaskManager::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&clock),
            limits,
        );
        Self {
            manager,
            tasks,
            projects,
            clock,
            limits,
        }
    }

    /// Builds a second manager over the same repositories and clock.
    fn manager(&self) -> TestManager {
        TaskManager::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.clock),
            self.limits,
        )
    }

    async fn project(&self, name: &str) -> Project {
        let project = Project::new(
            ProjectName::new(name).expect("valid project name"),
            ProjectDescription::new("").expect("valid project description"),
            &*self.clock,
        );
        self.projects
            .store(&project, self.limits.max_projects)
            .await
            .expect("project should be stored");
        project
    }
}
