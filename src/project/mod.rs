//! Project management for Taskboard.
//!
//! Projects are named containers for tasks. This module enforces the project
//! cap, global name uniqueness, and cascading deletion of a project's tasks.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
