//! Integration test support for the Bazaar API.
//!
//! The tests drive the real router in process with
//! `tower::ServiceExt::oneshot`; no server or database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Building Blocks
//!
//! - [`MockStore`] - recording double for every store trait
//! - [`TestApp`] - the full app over a mock or in-memory store, with helpers
//!   to mint tokens and send JSON requests
//! - [`fixtures`] - canned records for mock answers
//! - [`RecordingTaskDistributor`] - captures verification-email tasks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod fixtures;
pub mod mock;

pub use app::{RecordingTaskDistributor, TEST_TOKEN_KEY, TestApp, TestResponse, test_config};
pub use mock::{Call, ExpectationBuilder, MockStore};
