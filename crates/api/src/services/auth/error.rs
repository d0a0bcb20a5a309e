//! Authentication error types.

use bazaar_core::StoreError;
use thiserror::Error;

use crate::services::token::TokenError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but may not sign in.
    #[error("account is disabled")]
    AccountDisabled,

    /// Store error while looking up or creating the account.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
