//! Session-token claim types.
//!
//! The token carries a minimal user snapshot captured at sign-in. Claims are
//! not re-checked against the live user record on every request, so a role
//! change only takes effect once the token expires or the user signs in
//! again; `/api/auth/user` is the one endpoint that refreshes from the store.

use serde::{Deserialize, Serialize};

use veranda_core::{Email, Role, UserId};

use crate::models::user::User;

/// Minimal user identity embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User's role at sign-in time.
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Full claim set of a signed session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user snapshot captured at sign-in.
    pub user: SessionUser,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds).
    pub exp: i64,
}
