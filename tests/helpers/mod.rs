//! Shared fixtures for integration tests.

pub mod hir_helpers;
pub mod project_helpers;
