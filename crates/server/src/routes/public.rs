//! Unauthenticated routes backing the public site.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::db::{ContactRepository, OrderedStore, PostRepository, SiteInfoStore};
use crate::error::AppError;
use crate::models::{
    Contact, ContactDraft, Feature, Post, Reason, SiteInfo, Slide,
};
use crate::routes::chat;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/features", get(list_features))
        .route("/reasons", get(list_reasons))
        .route("/slides", get(list_slides))
        .route("/site-info", get(get_site_info))
        .route("/posts", get(list_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/contact", post(submit_contact))
        .merge(chat::router())
}

async fn list_features(State(state): State<AppState>) -> Result<Json<Vec<Feature>>, AppError> {
    let rows = OrderedStore::<Feature>::new(state.pool()).list(true).await?;
    Ok(Json(rows))
}

async fn list_reasons(State(state): State<AppState>) -> Result<Json<Vec<Reason>>, AppError> {
    let rows = OrderedStore::<Reason>::new(state.pool()).list(true).await?;
    Ok(Json(rows))
}

async fn list_slides(State(state): State<AppState>) -> Result<Json<Vec<Slide>>, AppError> {
    let rows = OrderedStore::<Slide>::new(state.pool()).list(true).await?;
    Ok(Json(rows))
}

async fn get_site_info(State(state): State<AppState>) -> Result<Json<SiteInfo>, AppError> {
    let info = SiteInfoStore::new(state.pool()).get().await?;
    Ok(Json(info))
}

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = PostRepository::new(state.pool()).list_published().await?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = PostRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_owned()))?;
    Ok(Json(post))
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> Result<Json<Contact>, AppError> {
    for (field, value) in [
        ("name", &draft.name),
        ("email", &draft.email),
        ("subject", &draft.subject),
        ("message", &draft.message),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }
    if veranda_core::Email::parse(&draft.email).is_err() {
        return Err(AppError::Validation("invalid email address".to_owned()));
    }

    let contact = ContactRepository::new(state.pool()).create(&draft).await?;
    Ok(Json(contact))
}
