//! Collaborator services used by the handlers.
//!
//! # Services
//!
//! - `auth` - Password hashing and login for users and admins
//! - `token` - Bearer token issuance and verification
//! - `tasks` - Background task distribution (verification emails)
//!
//! Each collaborator is reached through a narrow trait so handlers can be
//! exercised with test doubles.

pub mod auth;
pub mod tasks;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use tasks::{LoggingTaskDistributor, SendVerifyEmailPayload, TaskDistributor, TaskError};
pub use token::{HmacTokenMaker, TokenClaims, TokenError, TokenMaker};
