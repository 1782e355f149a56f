//! Shared state behind the in-memory adapters.
//!
//! Projects and tasks sit behind one lock. A project removal drops the
//! project's tasks in the same write, and a task insert checks that its
//! project is still present, so the in-memory adapters keep the same
//! guarantees as the foreign key in the relational schema.

use crate::{
    project::domain::{Project, ProjectId, ProjectName},
    task::domain::{Task, TaskId},
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle to the state shared by the in-memory project and task repositories.
///
/// Clones share the same state. Build both repositories from clones of one
/// store:
///
/// ```rust
/// use taskboard::{
///     memory::InMemoryStore,
///     project::adapters::memory::InMemoryProjectRepository,
///     task::adapters::memory::InMemoryTaskRepository,
/// };
///
/// let store = InMemoryStore::new();
/// let projects = InMemoryProjectRepository::new(store.clone());
/// let tasks = InMemoryTaskRepository::new(store);
/// # let _ = (projects, tasks);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) projects: HashMap<ProjectId, Stored<Project>>,
    pub(crate) project_names: HashMap<ProjectName, ProjectId>,
    pub(crate) tasks: HashMap<TaskId, Stored<Task>>,
    next_sequence: u64,
}

/// Entity plus insertion order, used to break `created_at` ties.
#[derive(Debug)]
pub(crate) struct Stored<T> {
    pub(crate) sequence: u64,
    pub(crate) value: T,
}

impl StoreState {
    /// Wraps `value` with the next insertion sequence number.
    pub(crate) const fn sequenced<T>(&mut self, value: T) -> Stored<T> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Stored { sequence, value }
    }

    /// Removes a project, its name, and every task that belongs to it.
    pub(crate) fn remove_project(&mut self, id: ProjectId) -> Option<Project> {
        let removed = self.projects.remove(&id)?;
        self.project_names.remove(removed.value.name());
        self.tasks.retain(|_, stored| stored.value.project_id() != id);
        Some(removed.value)
    }

    /// Returns the number of tasks that belong to `project_id`.
    pub(crate) fn task_count(&self, project_id: ProjectId) -> usize {
        self.tasks
            .values()
            .filter(|stored| stored.value.project_id() == project_id)
            .count()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

/// Orders stored entities newest first, breaking ties by insertion order.
pub(crate) fn newest_first<T, F>(entries: &mut [&Stored<T>], created_at: F)
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    entries.sort_by(|left, right| {
        created_at(&right.value)
            .cmp(&created_at(&left.value))
            .then_with(|| right.sequence.cmp(&left.sequence))
    });
}
