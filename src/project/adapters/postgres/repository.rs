//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectDetailsChangeset, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectDescription, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// Name of the unique index backing project name uniqueness.
const NAME_UNIQUE_INDEX: &str = "idx_projects_name_unique";

/// Serialises project inserts so the cap check and the insert cannot
/// interleave with another insert. Plain reads are not blocked.
const LOCK_PROJECTS: &str = "LOCK TABLE projects IN SHARE ROW EXCLUSIVE MODE";

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project, max_projects: usize) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let new_row = to_new_row(project);
        let cap = i64::try_from(max_projects).unwrap_or(i64::MAX);

        self.run_blocking(move |connection| {
            let stored = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::sql_query(LOCK_PROJECTS).execute(tx)?;
                    let total = projects::table.count().get_result::<i64>(tx)?;
                    if total >= cap {
                        return Ok(false);
                    }
                    diesel::insert_into(projects::table)
                        .values(&new_row)
                        .execute(tx)?;
                    Ok(true)
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        ProjectRepositoryError::DuplicateName(name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            if stored {
                Ok(())
            } else {
                Err(ProjectRepositoryError::LimitReached { max: max_projects })
            }
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let changeset = ProjectDetailsChangeset {
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        ProjectRepositoryError::DuplicateName(name.clone())
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::name.eq(lookup))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            usize::try_from(total).map_err(ProjectRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

pub(super) fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        created_at: project.created_at(),
    }
}

pub(super) fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        created_at,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name: ProjectName::new(name).map_err(ProjectRepositoryError::invalid_persisted_data)?,
        description: ProjectDescription::new(description)
            .map_err(ProjectRepositoryError::invalid_persisted_data)?,
        created_at,
    };
    Ok(Project::from_persisted(data))
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == NAME_UNIQUE_INDEX)
}
