//! CLI integration tests.
//!
//! Every test points the binary at its own file-backed registry through
//! `WINALIAS_REGISTRY_FILE`, so they run on any host and in parallel.

mod alias_tests;
mod common;
