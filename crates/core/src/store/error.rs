//! Store error vocabulary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of integrity constraint a write violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// A referenced record does not exist.
    ForeignKey,
    /// A record with the same natural key already exists.
    Unique,
    /// The write would leave a record in an invalid state.
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForeignKey => write!(f, "foreign key"),
            Self::Unique => write!(f, "unique"),
            Self::Check => write!(f, "check"),
        }
    }
}

/// Errors reported by any store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested record does not exist (or is not visible to the caller).
    #[error("record not found")]
    NotFound,

    /// A write violated an integrity constraint.
    #[error("{kind} constraint violated: {detail}")]
    Constraint {
        kind: ConstraintKind,
        detail: String,
    },

    /// Any other backend failure.
    #[error("store failure: {0}")]
    Internal(String),
}

impl StoreError {
    /// Shorthand for a foreign-key violation.
    #[must_use]
    pub fn foreign_key(detail: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::ForeignKey,
            detail: detail.into(),
        }
    }

    /// Shorthand for a uniqueness violation.
    #[must_use]
    pub fn unique(detail: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::Unique,
            detail: detail.into(),
        }
    }

    /// Shorthand for a check-constraint violation.
    #[must_use]
    pub fn check(detail: impl Into<String>) -> Self {
        Self::Constraint {
            kind: ConstraintKind::Check,
            detail: detail.into(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
