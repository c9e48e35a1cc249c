//! Admin blog post routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use veranda_core::PostId;

use crate::db::PostRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Post, PostDraft, PostPage, PostPatch};
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 10;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

async fn list_posts(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostPage>, AppError> {
    let page = PostRepository::new(state.pool())
        .list_page(
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?;
    Ok(Json(page))
}

async fn create_post(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<Post>, AppError> {
    if draft.title.trim().is_empty() || draft.slug.trim().is_empty() {
        return Err(AppError::Validation("title and slug are required".to_owned()));
    }
    let post = PostRepository::new(state.pool())
        .create(&draft, &user.id)
        .await?;
    Ok(Json(post))
}

async fn get_post(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = PostRepository::new(state.pool())
        .get(&PostId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_owned()))?;
    Ok(Json(post))
}

async fn update_post(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>, AppError> {
    let post = PostRepository::new(state.pool())
        .update(&PostId::new(id), &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_owned()))?;
    Ok(Json(post))
}

async fn delete_post(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !PostRepository::new(state.pool())
        .delete(&PostId::new(id))
        .await?
    {
        return Err(AppError::NotFound("post".to_owned()));
    }
    Ok(Json(json!({ "success": true })))
}
