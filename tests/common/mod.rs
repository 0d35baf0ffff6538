// tests/common/mod.rs
//! Common test utilities for stdio integration tests.

pub mod mock_wordpress;

pub use mock_wordpress::{serve_lines, MockWordPress};
