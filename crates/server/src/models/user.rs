//! User account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veranda_core::{Email, Role, UserId};

/// A user account.
///
/// The password hash never leaves the server: it is skipped during
/// serialization so handlers can return the model directly.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address (unique).
    pub email: Email,
    /// Display name, if set.
    pub name: Option<String>,
    /// bcrypt hash of the password; `None` for accounts without one.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Avatar image URL, if set.
    pub image: Option<String>,
    /// Privilege level.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Typed partial update for a user's own profile.
///
/// Omitted fields are left unchanged; role and password changes go through
/// dedicated paths (superadmin user management and the password endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New avatar image URL.
    pub image: Option<String>,
}

impl UserPatch {
    /// Whether the patch carries any pending change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: UserId::new("u-1".to_owned()),
            email: Email::parse("admin@example.com").unwrap(),
            name: Some("Administrator".to_owned()),
            password_hash: Some("$2b$10$abcdefghijklmnopqrstuv".to_owned()),
            image: None,
            role: Role::Superadmin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
        assert!(json.contains("\"role\":\"superadmin\""));
    }

    #[test]
    fn test_user_patch_empty() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            name: Some("N".to_owned()),
            image: None,
        };
        assert!(!patch.is_empty());
    }
}
