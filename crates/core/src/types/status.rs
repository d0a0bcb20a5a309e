//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Admin account type with different permission levels.
///
/// Only [`AdminType::SuperAdmin`] may use the admin-scoped endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminType {
    /// Full access, including policy, dashboard and admin management.
    SuperAdmin,
    /// Store management without account administration.
    Admin,
    /// Read-only access.
    Viewer,
}

impl AdminType {
    /// Numeric type ID as stored alongside the admin account.
    #[must_use]
    pub const fn type_id(self) -> i32 {
        match self {
            Self::SuperAdmin => 1,
            Self::Admin => 2,
            Self::Viewer => 3,
        }
    }

    /// Look up an admin type by its numeric type ID.
    #[must_use]
    pub const fn from_type_id(type_id: i32) -> Option<Self> {
        match type_id {
            1 => Some(Self::SuperAdmin),
            2 => Some(Self::Admin),
            3 => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdminType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin type: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_roundtrip() {
        for admin_type in [AdminType::SuperAdmin, AdminType::Admin, AdminType::Viewer] {
            assert_eq!(AdminType::from_type_id(admin_type.type_id()), Some(admin_type));
        }
        assert_eq!(AdminType::from_type_id(0), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("super_admin".parse::<AdminType>().unwrap(), AdminType::SuperAdmin);
        assert!("root".parse::<AdminType>().is_err());
    }
}
