//! Step definitions for overdue sweep behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
