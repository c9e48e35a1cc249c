//! User role hierarchy.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0} (expected user, admin, or superadmin)")]
pub struct RoleParseError(pub String);

/// Privilege level of a user account.
///
/// Stored as a lowercase string in the `users.role` column and embedded in
/// session-token claims. The gate checks are ordered: `Superadmin` implies
/// `Admin`, which implies an authenticated `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "mysql", derive(sqlx::Type))]
#[cfg_attr(feature = "mysql", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary account with no back-office access.
    #[default]
    User,
    /// May manage site content (features, reasons, slides, settings, posts).
    Admin,
    /// May additionally manage user accounts.
    Superadmin,
}

impl Role {
    /// Whether this role grants access to the admin back office.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// Whether this role grants user-management access.
    #[must_use]
    pub const fn is_superadmin(self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// The lowercase wire/storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_check_matrix() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::Superadmin.is_admin());
    }

    #[test]
    fn test_superadmin_check_matrix() {
        assert!(!Role::User.is_superadmin());
        assert!(!Role::Admin.is_superadmin());
        assert!(Role::Superadmin.is_superadmin());
    }

    #[test]
    fn test_round_trip_strings() {
        for role in [Role::User, Role::Admin, Role::Superadmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Superadmin).unwrap(),
            "\"superadmin\""
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
