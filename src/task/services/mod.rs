//! Application services for task lifecycle orchestration.

mod manager;
mod sweeper;

pub use manager::{
    CreateTaskRequest, TaskManager, TaskManagerError, TaskManagerResult, UpdateTaskRequest,
};
pub use sweeper::OverdueSweeper;
