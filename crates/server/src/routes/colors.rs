//! Admin theme-color routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::db::ColorRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{ColorConfig, ColorUpsert};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/colors", get(list_colors).put(upsert_color))
        .route("/colors/{key}", axum::routing::delete(delete_color))
}

async fn list_colors(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ColorConfig>>, AppError> {
    let colors = ColorRepository::new(state.pool()).list().await?;
    Ok(Json(colors))
}

async fn upsert_color(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ColorUpsert>,
) -> Result<Json<ColorConfig>, AppError> {
    if payload.key.trim().is_empty() || payload.value.trim().is_empty() {
        return Err(AppError::Validation("key and value are required".to_owned()));
    }
    let color = ColorRepository::new(state.pool()).upsert(&payload).await?;
    Ok(Json(color))
}

async fn delete_color(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !ColorRepository::new(state.pool()).delete(&key).await? {
        return Err(AppError::NotFound("color".to_owned()));
    }
    Ok(Json(json!({ "success": true })))
}
