//! Admin CRUD and reorder routes for the ordered content collections.
//!
//! One generic router serves features, reasons, and slides; the entity type
//! parameter picks the table and payload shapes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::OrderedStore;
use crate::db::ordered::{ContentDraft, OrderedEntity};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::ReorderRequest;
use crate::state::AppState;

pub fn ordered_router<E>() -> Router<AppState>
where
    E: OrderedEntity + Serialize,
    E::Draft: DeserializeOwned,
    E::Patch: DeserializeOwned,
{
    Router::new()
        .route("/", get(list::<E>).post(create::<E>).put(reorder::<E>))
        .route(
            "/{id}",
            get(get_one::<E>).put(update::<E>).delete(delete_one::<E>),
        )
}

async fn list<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<E>>, AppError>
where
    E: OrderedEntity + Serialize,
{
    let rows = OrderedStore::<E>::new(state.pool()).list(false).await?;
    Ok(Json(rows))
}

async fn get_one<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E>, AppError>
where
    E: OrderedEntity + Serialize,
{
    let row = OrderedStore::<E>::new(state.pool())
        .get(&id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(row))
}

async fn create<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(draft): Json<E::Draft>,
) -> Result<Json<E>, AppError>
where
    E: OrderedEntity + Serialize,
    E::Draft: DeserializeOwned,
{
    if let Some(field) = draft.missing_field() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    let row = OrderedStore::<E>::new(state.pool()).create(&draft).await?;
    Ok(Json(row))
}

async fn update<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<E::Patch>,
) -> Result<Json<E>, AppError>
where
    E: OrderedEntity + Serialize,
    E::Patch: DeserializeOwned,
{
    let row = OrderedStore::<E>::new(state.pool())
        .update(&id, &patch)
        .await?
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(row))
}

async fn delete_one<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError>
where
    E: OrderedEntity + Serialize,
{
    let deleted = OrderedStore::<E>::new(state.pool()).delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(id));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn reorder<E>(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<Vec<E>>, AppError>
where
    E: OrderedEntity + Serialize,
{
    if body.ids.is_empty() {
        return Err(AppError::Validation("ids must not be empty".to_owned()));
    }
    let store = OrderedStore::<E>::new(state.pool());
    store.reorder(&body.ids).await?;
    let rows = store.list(false).await?;
    Ok(Json(rows))
}
