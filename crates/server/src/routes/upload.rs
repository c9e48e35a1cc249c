//! Admin image upload and library routes.

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::upload::{self, MAX_UPLOAD_BYTES, StoredImage, StoredUpload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    // Leave headroom over the file cap for the multipart framing.
    Router::new()
        .route("/upload/image", post(upload_image))
        .route("/images", get(list_images).delete(delete_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
}

/// Accepts a multipart form with a `file` part and an optional `folder`
/// text part naming the target subdirectory.
async fn upload_image(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StoredUpload>, AppError> {
    let mut folder: Option<String> = None;
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("folder") => {
                folder = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("invalid folder field: {e}")))?,
                );
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(AppError::Validation("missing file field".to_owned()));
    };

    let stored = upload::store_image(
        &state.config().upload_dir,
        folder.as_deref(),
        file_name.as_deref(),
        content_type.as_deref(),
        &data,
    )
    .await?;
    Ok(Json(stored))
}

#[derive(Debug, Deserialize)]
struct LibraryQuery {
    prefix: Option<String>,
    limit: Option<usize>,
}

async fn list_images(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let files: Vec<StoredImage> = upload::list_images(
        &state.config().upload_dir,
        query.prefix.as_deref(),
        query.limit,
    )
    .await?;
    Ok(Json(serde_json::json!({ "files": files })))
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    path: Option<String>,
}

async fn delete_image(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::Validation("path is required".to_owned()))?;

    let deleted = upload::delete_image(&state.config().upload_dir, &path).await?;
    if !deleted {
        return Err(AppError::NotFound(path));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
