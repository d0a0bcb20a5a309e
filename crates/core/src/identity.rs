//! Verified caller identity and the ownership guard.
//!
//! An [`Identity`] is produced by token verification and handed to handlers
//! as an explicit argument. The [`Authorize`] trait compares it against the
//! owner implied by the request path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AdminId, AdminType, UserId};

/// An end user resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: UserId,
}

/// An admin resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub admin_id: AdminId,
    pub admin_type: AdminType,
    pub active: bool,
}

/// The verified caller attached to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    User(UserIdentity),
    Admin(AdminIdentity),
}

impl Identity {
    /// The user identity, if the caller is an end user.
    #[must_use]
    pub const fn as_user(&self) -> Option<UserIdentity> {
        match self {
            Self::User(user) => Some(*user),
            Self::Admin(_) => None,
        }
    }

    /// The admin identity, if the caller is an admin.
    #[must_use]
    pub const fn as_admin(&self) -> Option<AdminIdentity> {
        match self {
            Self::Admin(admin) => Some(*admin),
            Self::User(_) => None,
        }
    }
}

/// The caller does not own the requested resource.
///
/// Ownership mismatch is reported the same way as missing authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("account doesn't belong to the authenticated user")]
    NotOwner,
    #[error("admin is not an active super admin")]
    NotSuperAdmin,
}

/// Compare a caller against the resource owner named in the request path.
pub trait Authorize {
    /// The owner identifier carried by the path (`UserId`, `AdminId`).
    type Scope;

    /// Succeeds only if the caller may act on resources owned by `scope`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthorizationError`] describing the failed check.
    fn authorize(&self, scope: Self::Scope) -> Result<(), AuthorizationError>;
}

impl Authorize for UserIdentity {
    type Scope = UserId;

    fn authorize(&self, scope: UserId) -> Result<(), AuthorizationError> {
        if self.user_id == scope {
            Ok(())
        } else {
            Err(AuthorizationError::NotOwner)
        }
    }
}

impl Authorize for AdminIdentity {
    type Scope = AdminId;

    fn authorize(&self, scope: AdminId) -> Result<(), AuthorizationError> {
        if self.admin_id != scope {
            return Err(AuthorizationError::NotOwner);
        }
        if self.admin_type != AdminType::SuperAdmin || !self.active {
            return Err(AuthorizationError::NotSuperAdmin);
        }
        Ok(())
    }
}
