//! Own-profile routes: any authenticated session may edit its profile and
//! change its password.

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{User, UserPatch};
use crate::services::auth as credentials;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/password", put(change_password))
}

async fn get_profile(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<User>, AppError> {
    let user = UserRepository::new(state.pool())
        .find_by_id(&session.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    Ok(Json(user))
}

async fn update_profile(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    let user = UserRepository::new(state.pool())
        .update_profile(&session.id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    current_password: Option<String>,
    new_password: Option<String>,
}

async fn change_password(
    CurrentUser(session): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(current), Some(new)) = (body.current_password, body.new_password) else {
        return Err(AppError::Validation(
            "currentPassword and newPassword are required".to_owned(),
        ));
    };
    credentials::change_password(state.pool(), &session.id, &current, &new).await?;
    Ok(Json(json!({ "success": true })))
}
