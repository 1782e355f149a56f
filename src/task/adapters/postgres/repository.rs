//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::{
    project::{adapters::postgres::schema::projects, domain::ProjectId},
    task::{
        domain::{
            Deadline, PersistedTaskData, Task, TaskDescription, TaskId, TaskStatus, TaskTitle,
        },
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const DONE: &str = TaskStatus::Done.as_str();

/// Result of the guarded insert in [`PostgresTaskRepository::store`].
enum InsertOutcome {
    Stored,
    MissingProject,
    AtCapacity,
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task, max_per_project: usize) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = to_new_row(task)?;
        let cap = i64::try_from(max_per_project).unwrap_or(i64::MAX);

        self.run_blocking(move |connection| {
            let outcome = connection
                .transaction::<_, DieselError, _>(|tx| {
                    // Locking the project row serialises inserts into the
                    // project and blocks its deletion until commit.
                    let live = projects::table
                        .find(project_id.into_inner())
                        .select(projects::id)
                        .for_update()
                        .first::<Uuid>(tx)
                        .optional()?;
                    if live.is_none() {
                        return Ok(InsertOutcome::MissingProject);
                    }
                    let total = tasks::table
                        .filter(tasks::project_id.eq(project_id.into_inner()))
                        .count()
                        .get_result::<i64>(tx)?;
                    if total >= cap {
                        return Ok(InsertOutcome::AtCapacity);
                    }
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx)?;
                    Ok(InsertOutcome::Stored)
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ProjectNotFound(project_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            match outcome {
                InsertOutcome::Stored => Ok(()),
                InsertOutcome::MissingProject => {
                    Err(TaskRepositoryError::ProjectNotFound(project_id))
                }
                InsertOutcome::AtCapacity => Err(TaskRepositoryError::LimitReached {
                    project_id,
                    max: max_per_project,
                }),
            }
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let expected = task.revision().saturating_sub(1);
        let expected_column = i64::try_from(expected).map_err(TaskRepositoryError::persistence)?;
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .find(task_id.into_inner())
                    .filter(tasks::revision.eq(expected_column)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated > 0 {
                return Ok(());
            }
            if task_exists(connection, task_id)? {
                Err(TaskRepositoryError::Conflict {
                    id: task_id,
                    expected,
                })
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::project_id.eq(project_id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            usize::try_from(total).map_err(TaskRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deadline.lt(now))
                .filter(tasks::status.ne(DONE))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn close_if_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            // The predicate is re-evaluated by the UPDATE itself, so a task
            // that was completed or rescheduled after listing stays untouched.
            let updated = diesel::update(
                tasks::table
                    .find(id.into_inner())
                    .filter(tasks::status.ne(DONE))
                    .filter(tasks::deadline.lt(now)),
            )
            .set((
                tasks::status.eq(DONE),
                tasks::closed_at.eq(now),
                tasks::revision.eq(tasks::revision + 1_i64),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated > 0 {
                return Ok(true);
            }
            if task_exists(connection, id)? {
                Ok(false)
            } else {
                Err(TaskRepositoryError::NotFound(id))
            }
        })
        .await
    }
}

fn task_exists(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(tasks::table.find(id.into_inner())))
        .get_result::<bool>(connection)
        .map_err(TaskRepositoryError::persistence)
}

pub(super) fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().map(Deadline::at),
        created_at: task.created_at(),
        closed_at: task.closed_at(),
        revision: i64::try_from(task.revision()).map_err(TaskRepositoryError::persistence)?,
    })
}

pub(super) fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().map(Deadline::at),
        closed_at: task.closed_at(),
        revision: i64::try_from(task.revision()).map_err(TaskRepositoryError::persistence)?,
    })
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status,
        deadline,
        created_at,
        closed_at,
        revision,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::invalid_persisted_data)?,
        description: TaskDescription::new(description)
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        status: TaskStatus::try_from(status.as_str())
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        deadline: deadline.map(Deadline::from_persisted),
        created_at,
        closed_at,
        revision: u64::try_from(revision).map_err(TaskRepositoryError::invalid_persisted_data)?,
    };
    Ok(Task::from_persisted(data))
}
