//! Library integration tests.

mod file_backend_tests;
mod store_tests;
