//! Taskboard: a personal task tracker.
//!
//! This crate manages projects and the tasks inside them, with a hard cap on
//! both, and closes overdue tasks on a schedule.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Managers that enforce limits and orchestrate repositories
//!
//! # Modules
//!
//! - [`config`]: Limits and sweep interval read from the environment
//! - [`error`]: Caller-facing error classification
//! - [`memory`]: Shared state behind the in-memory adapters
//! - [`project`]: Project creation, renaming, and cascading deletion
//! - [`task`]: Task lifecycle and the overdue sweep

pub mod config;
pub mod error;
pub mod memory;
pub mod project;
pub mod task;

#[cfg(test)]
mod test_utils;
