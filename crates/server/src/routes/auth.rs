//! Sign-in, sign-out, and session introspection.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::middleware::{AUTH_COOKIE, CurrentUser};
use crate::models::SessionUser;
use crate::services::auth as credentials;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/user", get(current_user))
}

/// Fields arrive as options so a missing field is a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
struct SignInRequest {
    email: Option<String>,
    password: Option<String>,
}

async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::Validation("email and password are required".to_owned()));
    };

    let user = credentials::sign_in(state.pool(), &email, &password).await?;
    let token = state.tokens().issue(SessionUser::from(&user))?;
    let jar = jar.add(session_cookie(&state, token));

    Ok((jar, Json(json!({ "user": user }))))
}

async fn sign_out(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(removal_cookie());
    (jar, Json(json!({ "success": true })))
}

/// Refresh the session user from the store, so role changes made after
/// sign-in are visible here even though the token still carries the old
/// snapshot.
async fn current_user(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Value>, AppError> {
    let user = crate::db::UserRepository::new(state.pool())
        .find_by_id(&session.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    Ok(Json(json!({ "user": user })))
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().production)
        .max_age(time::Duration::seconds(state.tokens().ttl_seconds()))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}
