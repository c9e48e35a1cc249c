//! Request extractors for authentication and role gates.

pub mod auth;

pub use auth::{AUTH_COOKIE, CurrentUser, RequireAdmin, RequireSuperadmin};
