//! HTTP route assembly.
//!
//! Three surfaces share one router: `/api/auth` for sessions, `/api/admin`
//! for the role-gated back office, and `/api/public` for the site itself.
//! Uploaded files are served statically under `/uploads`.

mod auth;
mod chat;
mod colors;
mod contacts;
mod content;
mod posts;
mod profile;
mod public;
mod site_info;
mod upload;
mod users;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

use crate::error::AppError;
use crate::models::{Feature, Reason, Slide};
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .nest("/features", content::ordered_router::<Feature>())
        .nest("/reasons", content::ordered_router::<Reason>())
        .nest("/slides", content::ordered_router::<Slide>())
        .merge(site_info::router())
        .merge(profile::router())
        .merge(users::router())
        .merge(posts::router())
        .merge(contacts::router())
        .merge(colors::router())
        .merge(upload::router());

    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/admin", admin)
        .nest("/api/public", public::router())
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest_service("/uploads", ServeDir::new(&state.config().upload_dir))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness: confirms the database answers.
async fn ready(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(crate::db::RepositoryError::from)?;
    Ok(Json(json!({ "status": "ready" })))
}
