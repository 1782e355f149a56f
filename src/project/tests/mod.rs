//! Unit tests for project management.
