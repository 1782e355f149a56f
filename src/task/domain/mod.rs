//! Domain model for tasks.
//!
//! A [`Task`] belongs to exactly one project, moves freely between the
//! [`TaskStatus`] values, and may carry a [`Deadline`]. `closed_at` is present
//! exactly while the task is done.

mod deadline;
mod error;
mod fields;
mod ids;
mod status;
mod task;

pub use deadline::{DEADLINE_DATE_FORMAT, Deadline, DeadlineInput};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use fields::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, TaskDescription, TaskTitle};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges};
