//! Authentication service.
//!
//! Provides password registration and login for shoppers and admins, and
//! issues the bearer tokens the auth extractors later verify.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use bazaar_core::store::{
    Admin, AdminStore, CreateAdminParams, CreateUserParams, User, UserStore,
};
use bazaar_core::{AdminIdentity, AdminType, Email, Identity, UserIdentity};

use crate::services::token::TokenMaker;
use crate::state::AppState;

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

/// New account details, with the password still in clear text.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: Email,
    pub telephone: Option<String>,
    pub password: String,
}

/// Authentication service.
///
/// Handles registration and password login for users and admins.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    admins: &'a dyn AdminStore,
    tokens: &'a dyn TokenMaker,
    token_duration: TimeDelta,
}

impl<'a> AuthService<'a> {
    /// Create an authentication service over the application's stores.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            users: state.stores().users.as_ref(),
            admins: state.stores().admins.as_ref(),
            tokens: state.token_maker(),
            token_duration: state.config().access_token_duration,
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` with a unique-constraint error if the
    /// username or email is taken.
    /// Returns `AuthError::PasswordHash` if the password cannot be hashed.
    pub async fn register_user(&self, registration: Registration) -> Result<User, AuthError> {
        let hashed_password = hash_password(&registration.password)?;

        let user = self
            .users
            .create_user(CreateUserParams {
                username: registration.username,
                email: registration.email,
                telephone: registration.telephone,
                hashed_password,
            })
            .await?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store(StoreError::NotFound)` if there is no such user.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    /// Returns `AuthError::AccountDisabled` if the user is blocked.
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, IssuedToken), AuthError> {
        let user = self.users.get_user_by_username(username.to_owned()).await?;

        verify_password(password, &user.hashed_password)?;

        if user.is_blocked {
            return Err(AuthError::AccountDisabled);
        }

        let token = self.issue(Identity::User(UserIdentity { user_id: user.id }))?;
        Ok((user, token))
    }

    // =========================================================================
    // Admins
    // =========================================================================

    /// Register a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` with a unique-constraint error if the
    /// username or email is taken.
    pub async fn register_admin(
        &self,
        registration: Registration,
        admin_type: AdminType,
    ) -> Result<Admin, AuthError> {
        let hashed_password = hash_password(&registration.password)?;

        let admin = self
            .admins
            .create_admin(CreateAdminParams {
                username: registration.username,
                email: registration.email,
                hashed_password,
                admin_type,
            })
            .await?;

        Ok(admin)
    }

    /// Login as an admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store(StoreError::NotFound)` if there is no such admin.
    /// Returns `AuthError::InvalidCredentials` if the password is wrong.
    /// Returns `AuthError::AccountDisabled` if the admin is deactivated.
    pub async fn login_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(Admin, IssuedToken), AuthError> {
        let admin = self.admins.get_admin_by_username(username.to_owned()).await?;

        verify_password(password, &admin.hashed_password)?;

        if !admin.active {
            return Err(AuthError::AccountDisabled);
        }

        let token = self.issue(Identity::Admin(AdminIdentity {
            admin_id: admin.id,
            admin_type: admin.admin_type,
            active: admin.active,
        }))?;
        Ok((admin, token))
    }

    fn issue(&self, identity: Identity) -> Result<IssuedToken, AuthError> {
        let (access_token, claims) = self.tokens.create_token(identity, self.token_duration)?;
        Ok(IssuedToken {
            access_token,
            access_token_expires_at: claims.expires_at,
        })
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or an unreadable hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
