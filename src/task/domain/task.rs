//! Task aggregate root.

use super::{Deadline, TaskDescription, TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Every mutation advances `revision` by one. Repositories use the revision
/// to reject writes based on a stale read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Option<Deadline>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    revision: u64,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<Deadline>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted closing timestamp, if any.
    pub closed_at: Option<DateTime<Utc>>,
    /// Persisted revision.
    pub revision: u64,
}

/// Validated replacement values for a full task edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: TaskTitle,
    /// New description.
    pub description: TaskDescription,
    /// New status.
    pub status: TaskStatus,
    /// New deadline; `None` clears it.
    pub deadline: Option<Deadline>,
}

impl Task {
    /// Creates a `todo` task in the given project.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: TaskDescription,
        deadline: Option<Deadline>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            status: TaskStatus::Todo,
            deadline,
            created_at: clock.utc(),
            closed_at: None,
            revision: 0,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            closed_at: data.closed_at,
            revision: data.revision,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the task was last moved to `done`, while it is done.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the optimistic-concurrency revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` when the task is not done and its deadline has passed.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_done() && self.deadline.is_some_and(|deadline| deadline.has_passed(now))
    }

    /// Moves the task to `status`.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.apply_status(status, clock.utc());
        self.bump_revision();
    }

    /// Replaces every editable field in one revision.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            status,
            deadline,
        } = changes;
        self.title = title;
        self.description = description;
        self.deadline = deadline;
        self.apply_status(status, clock.utc());
        self.bump_revision();
    }

    /// Closes the task if it is overdue at `now`.
    ///
    /// Returns `false` and leaves the task untouched otherwise.
    pub fn close_if_overdue(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_overdue_at(now) {
            return false;
        }
        self.apply_status(TaskStatus::Done, now);
        self.bump_revision();
        true
    }

    /// Keeps `closed_at` present exactly while the task is done. Re-marking a
    /// done task keeps its original closing time.
    fn apply_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        match (self.status.is_done(), status.is_done()) {
            (false, true) => self.closed_at = Some(now),
            (_, false) => self.closed_at = None,
            (true, true) => self.closed_at = self.closed_at.or(Some(now)),
        }
        self.status = status;
    }

    const fn bump_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }
}
