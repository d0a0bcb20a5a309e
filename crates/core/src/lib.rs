//! Bazaar Core - Shared types library.
//!
//! This crate provides the types and traits shared by the Bazaar API:
//! - `api` - HTTP handlers, authentication and the in-memory backend
//! - `integration-tests` - HTTP-level tests and store test doubles
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. Handlers depend on the store traits defined here and never
//! on a concrete database driver.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails and admin types
//! - [`identity`] - Verified caller identity and the ownership guard
//! - [`store`] - Per-aggregate store traits, their records and the error vocabulary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod identity;
pub mod store;
pub mod types;

pub use identity::{AdminIdentity, Authorize, AuthorizationError, Identity, UserIdentity};
pub use store::{ConstraintKind, StoreError, StoreResult};
pub use types::*;
