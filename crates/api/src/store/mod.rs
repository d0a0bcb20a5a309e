//! Store backends.
//!
//! The API depends only on the traits in `bazaar_core::store`. This module
//! holds the in-memory backend used for local runs and tests.
//!
//! # Tables
//!
//! - `users` with one shopping cart and one wish list each
//! - `admins`
//! - `app_policies`
//! - `notifications` keyed by user and device
//! - `shopping_cart_items`, `wish_list_items`
//! - `orders` written by checkout
//! - Catalog: `product_items`, `product_sizes`, plus reference rows for
//!   addresses, payment types, shipping methods and order statuses

mod catalog;
mod memory;

pub use catalog::CatalogSeed;
pub use memory::MemoryStore;
