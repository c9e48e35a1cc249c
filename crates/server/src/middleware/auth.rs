//! Session extractors.
//!
//! Three gates, each an axum extractor so handlers declare their requirement
//! in the signature:
//!
//! - [`CurrentUser`]: any valid session (401 otherwise)
//! - [`RequireAdmin`]: admin or superadmin role (401 without a session,
//!   403 with one that lacks the role)
//! - [`RequireSuperadmin`]: superadmin only
//!
//! The session cookie carries a signed token; a missing, malformed, or
//! expired token is indistinguishable from no session at all.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::error::{AppError, set_sentry_user};
use crate::models::SessionUser;
use crate::state::AppState;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth_token";

/// Extracts the authenticated user from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Requires an admin or superadmin session.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionUser);

/// Requires a superadmin session.
#[derive(Debug, Clone)]
pub struct RequireSuperadmin(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

        let claims = state
            .tokens()
            .verify(&token)
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

        set_sentry_user(claims.user.id.as_str(), Some(claims.user.email.as_str()));
        Ok(Self(claims.user))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(AppError::Forbidden("admin access required".to_owned()));
        }
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireSuperadmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_superadmin() {
            return Err(AppError::Forbidden("superadmin access required".to_owned()));
        }
        Ok(Self(user))
    }
}
