//! In-memory repository for tasks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use crate::{
    memory::{InMemoryStore, Stored, StoreState, newest_first},
    project::domain::ProjectId,
    task::{
        domain::{Task, TaskId},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};

/// Thread-safe in-memory task repository.
///
/// All writes, including the conditional overdue close, happen under the
/// shared store's write lock, so a sweep and an interactive update never
/// interleave on the same task, and a task insert never races the deletion
/// of its project.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: InMemoryStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over `store`.
    ///
    /// Tasks can only be stored for projects present in the same store.
    #[must_use]
    pub const fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.store.read().map_err(TaskRepositoryError::persistence)
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.store.write().map_err(TaskRepositoryError::persistence)
    }
}

/// Collects matching tasks ordered newest first.
fn collect_newest_first<F>(state: &StoreState, predicate: F) -> Vec<Task>
where
    F: Fn(&Task) -> bool,
{
    let mut matching: Vec<&Stored<Task>> = state
        .tasks
        .values()
        .filter(|stored| predicate(&stored.value))
        .collect();
    newest_first(&mut matching, Task::created_at);
    matching.into_iter().map(|stored| stored.value.clone()).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task, max_per_project: usize) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let project_id = task.project_id();
        if !state.projects.contains_key(&project_id) {
            return Err(TaskRepositoryError::ProjectNotFound(project_id));
        }
        if state.task_count(project_id) >= max_per_project {
            return Err(TaskRepositoryError::LimitReached {
                project_id,
                max: max_per_project,
            });
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let entry = state.sequenced(task.clone());
        state.tasks.insert(task.id(), entry);
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        let expected = task.revision().saturating_sub(1);
        if stored.value.revision() != expected || task.revision() == 0 {
            return Err(TaskRepositoryError::Conflict {
                id: task.id(),
                expected,
            });
        }
        stored.value = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).map(|stored| stored.value.clone()))
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_newest_first(&state, |task| {
            task.project_id() == project_id
        }))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.tasks.len();
        state
            .tasks
            .retain(|_, stored| stored.value.project_id() != project_id);
        Ok(before - state.tasks.len())
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.task_count(project_id))
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_newest_first(&state, |task| task.is_overdue_at(now)))
    }

    async fn close_if_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        Ok(stored.value.close_if_overdue(now))
    }
}
