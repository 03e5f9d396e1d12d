//! Project layer tests: scans, program replacement, system declarations.

pub mod tests_registry;
pub mod tests_scan;
