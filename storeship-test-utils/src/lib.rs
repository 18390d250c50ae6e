//! Test utilities for the storeship client
//!
//! Provides a configurable mock provisioning backend with call recording and
//! builders for common test fixtures.

pub mod builders;
pub mod mocks;

pub use builders::test_data;
pub use mocks::backend::{MockBackend, RecordedCall};
