//! Admin site-settings routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::SiteInfoStore;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{SiteInfo, SiteInfoPatch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/site-info", get(get_site_info).put(update_site_info))
}

async fn get_site_info(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<SiteInfo>, AppError> {
    let info = SiteInfoStore::new(state.pool()).get().await?;
    Ok(Json(info))
}

async fn update_site_info(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(patch): Json<SiteInfoPatch>,
) -> Result<Json<SiteInfo>, AppError> {
    let info = SiteInfoStore::new(state.pool())
        .upsert(&patch, Some(user.email.as_str()))
        .await?;
    Ok(Json(info))
}
