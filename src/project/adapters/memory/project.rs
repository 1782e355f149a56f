//! In-memory repository for projects.

use async_trait::async_trait;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use crate::{
    memory::{InMemoryStore, Stored, StoreState, newest_first},
    project::{
        domain::{Project, ProjectId, ProjectName},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
};

/// Thread-safe in-memory project repository.
///
/// Deleting a project also drops its tasks from the shared
/// [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    store: InMemoryStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.store.read().map_err(ProjectRepositoryError::persistence)
    }

    fn write(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.store.write().map_err(ProjectRepositoryError::persistence)
    }
}

/// Rejects `name` when it belongs to a project other than `owner`.
fn ensure_name_available(
    state: &StoreState,
    name: &ProjectName,
    owner: ProjectId,
) -> ProjectRepositoryResult<()> {
    match state.project_names.get(name) {
        Some(holder) if *holder != owner => {
            Err(ProjectRepositoryError::DuplicateName(name.clone()))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project, max_projects: usize) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.len() >= max_projects {
            return Err(ProjectRepositoryError::LimitReached { max: max_projects });
        }
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        ensure_name_available(&state, project.name(), project.id())?;

        let entry = state.sequenced(project.clone());
        state
            .project_names
            .insert(project.name().clone(), project.id());
        state.projects.insert(project.id(), entry);
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let old_name = state
            .projects
            .get(&project.id())
            .map(|stored| stored.value.name().clone())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        ensure_name_available(&state, project.name(), project.id())?;

        state.project_names.remove(&old_name);
        state
            .project_names
            .insert(project.name().clone(), project.id());
        if let Some(stored) = state.projects.get_mut(&project.id()) {
            stored.value = project.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).map(|stored| stored.value.clone()))
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        let project = state
            .project_names
            .get(name)
            .and_then(|id| state.projects.get(id))
            .map(|stored| stored.value.clone());
        Ok(project)
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let mut stored: Vec<&Stored<Project>> = state.projects.values().collect();
        newest_first(&mut stored, Project::created_at);
        Ok(stored.into_iter().map(|entry| entry.value.clone()).collect())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .remove_project(id)
            .map(|_| ())
            .ok_or(ProjectRepositoryError::NotFound(id))
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        Ok(self.read()?.projects.len())
    }
}
