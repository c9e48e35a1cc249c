//! Admin contact-inbox routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use veranda_core::ContactId;

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Contact, ContactPatch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route(
            "/contacts/{id}",
            axum::routing::put(update_contact).delete(delete_contact),
        )
}

async fn list_contacts(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let contacts = ContactRepository::new(state.pool()).list().await?;
    let unread = contacts.iter().filter(|c| !c.read).count();
    Ok(Json(json!({ "contacts": contacts, "unreadCount": unread })))
}

async fn update_contact(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, AppError> {
    let contact = ContactRepository::new(state.pool())
        .set_read(&ContactId::new(id), patch.read)
        .await?
        .ok_or_else(|| AppError::NotFound("contact".to_owned()))?;
    Ok(Json(contact))
}

async fn delete_contact(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !ContactRepository::new(state.pool())
        .delete(&ContactId::new(id))
        .await?
    {
        return Err(AppError::NotFound("contact".to_owned()));
    }
    Ok(Json(json!({ "success": true })))
}
