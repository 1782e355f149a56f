//! Task management for Taskboard.
//!
//! Tasks belong to exactly one project and carry a title, description,
//! status, and optional deadline. This module enforces field limits, the
//! per-project task cap, the `closed_at` invariant on status changes, and
//! the periodic auto-close of overdue tasks. The module follows hexagonal
//! architecture:
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
