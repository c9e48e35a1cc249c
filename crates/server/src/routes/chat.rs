//! Chat-widget proxy routes.
//!
//! The widget opens a thread with `POST /start-chat` and keeps posting
//! messages to `POST /chat`. The thread id is minted here, sent to the
//! provider, and pinned in a cookie so a returning visitor resumes the
//! same conversation. Provider responses are passed through unchanged so
//! the widget sees exactly what the assistant sent.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::chat::ChatSettings;
use crate::db::SiteInfoStore;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the conversation-thread cookie.
pub const THREAD_COOKIE: &str = "thread_id";

/// Thread cookie lifetime: seven days.
const THREAD_TTL: time::Duration = time::Duration::days(7);

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start-chat", post(start_chat))
        .route("/chat", post(send_message))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartChatRequest {
    /// Discard the current thread and open a fresh one.
    is_reset: Option<bool>,
}

async fn start_chat(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<StartChatRequest>>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let is_reset = body.is_some_and(|Json(b)| b.is_reset.unwrap_or(false));
    let thread_id = next_thread_id(
        jar.get(THREAD_COOKIE).map(|c| c.value().to_owned()),
        is_reset,
    );

    let settings = resolve_settings(&state).await?;
    let reply = state.chat().start_chat(&settings, &thread_id).await?;

    let jar = jar.add(thread_cookie(state.config().production, thread_id));
    Ok((jar, Json(reply.0)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatMessageRequest {
    message: Option<String>,
    /// Explicit thread id wins over the cookie.
    thread_id: Option<String>,
}

async fn send_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ChatMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("message is required".to_owned()))?;
    let thread_id = body
        .thread_id
        .or_else(|| jar.get(THREAD_COOKIE).map(|c| c.value().to_owned()))
        .ok_or_else(|| AppError::Validation("no active chat thread".to_owned()))?;

    let settings = resolve_settings(&state).await?;
    let reply = state
        .chat()
        .send_message(&settings, &thread_id, &message)
        .await?;
    Ok(Json(reply.0))
}

async fn resolve_settings(state: &AppState) -> Result<ChatSettings, AppError> {
    let info = SiteInfoStore::new(state.pool()).get().await?;
    Ok(ChatSettings::resolve(&info, &state.config().chat)?)
}

/// Reuse the cookie's thread unless the widget asked for a reset or no
/// thread exists yet.
fn next_thread_id(existing: Option<String>, is_reset: bool) -> String {
    match existing {
        Some(id) if !is_reset && !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    }
}

fn thread_cookie(production: bool, thread_id: String) -> Cookie<'static> {
    Cookie::build((THREAD_COOKIE, thread_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(production)
        .max_age(THREAD_TTL)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_survives_repeated_starts() {
        let id = next_thread_id(Some("t-existing".to_owned()), false);
        assert_eq!(id, "t-existing");
    }

    #[test]
    fn test_reset_or_missing_thread_mints_a_fresh_id() {
        let minted = next_thread_id(None, false);
        assert!(Uuid::parse_str(&minted).is_ok());

        let reset = next_thread_id(Some("t-old".to_owned()), true);
        assert_ne!(reset, "t-old");
        assert!(Uuid::parse_str(&reset).is_ok());

        let blank = next_thread_id(Some("  ".to_owned()), false);
        assert!(Uuid::parse_str(&blank).is_ok());
    }

    #[test]
    fn test_thread_cookie_is_pinned_for_a_week() {
        let cookie = thread_cookie(true, "t-1".to_owned());
        assert_eq!(cookie.name(), "thread_id");
        assert_eq!(cookie.max_age(), Some(THREAD_TTL));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
