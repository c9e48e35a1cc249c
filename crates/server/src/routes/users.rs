//! Superadmin user management.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use veranda_core::{Email, Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireSuperadmin;
use crate::models::User;
use crate::services::auth::{MIN_PASSWORD_LEN, hash_password};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", axum::routing::put(update_user).delete(delete_user))
}

async fn list_users(
    RequireSuperadmin(_): RequireSuperadmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
struct NewUserRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    role: Option<String>,
}

async fn create_user(
    RequireSuperadmin(_): RequireSuperadmin,
    State(state): State<AppState>,
    Json(body): Json<NewUserRequest>,
) -> Result<Json<User>, AppError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::Validation("email and password are required".to_owned()));
    };
    let email = Email::parse(&email).map_err(|e| AppError::Validation(e.to_string()))?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let role = parse_role(body.role.as_deref())?;

    let hash = hash_password(&password)?;
    let user = UserRepository::new(state.pool())
        .create(&email, &hash, body.name.as_deref(), role)
        .await?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
struct UserRoleRequest {
    role: Option<String>,
}

async fn update_user(
    RequireSuperadmin(actor): RequireSuperadmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserRoleRequest>,
) -> Result<Json<User>, AppError> {
    let id = UserId::new(id);
    if id == actor.id {
        return Err(AppError::Validation("cannot change your own role".to_owned()));
    }
    let role = parse_role(body.role.as_deref())?;

    let users = UserRepository::new(state.pool());
    if !users.set_role(&id, role).await? {
        return Err(AppError::NotFound("user".to_owned()));
    }
    let user = users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    Ok(Json(user))
}

async fn delete_user(
    RequireSuperadmin(actor): RequireSuperadmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = UserId::new(id);
    if id == actor.id {
        return Err(AppError::Validation("cannot delete your own account".to_owned()));
    }
    if !UserRepository::new(state.pool()).delete(&id).await? {
        return Err(AppError::NotFound("user".to_owned()));
    }
    Ok(Json(json!({ "success": true })))
}

fn parse_role(role: Option<&str>) -> Result<Role, AppError> {
    role.map_or(Ok(Role::Admin), |r| {
        Role::from_str(r).map_err(|e| AppError::Validation(e.to_string()))
    })
}
