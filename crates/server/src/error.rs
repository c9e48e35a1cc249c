//! Unified error handling for the API.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! the taxonomy onto HTTP status codes with a JSON `{"error": ...}` body.
//! Unauthenticated (401) and insufficient-role (403) are kept distinct.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::chat::ChatError;
use crate::db::RepositoryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Chat provider call failed or is misconfigured.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client (missing or malformed input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry. Uniqueness conflicts are a client
        // problem, not a server fault.
        if matches!(
            self,
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Chat(e) => e.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_) => {
                "Internal server error".to_owned()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Set the Sentry user context once a request principal is known.
pub fn set_sentry_user(user_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_owned()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("feature-123".to_owned());
        assert_eq!(err.to_string(), "Not found: feature-123");

        let err = AppError::Validation("title is required".to_owned());
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("x".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Validation("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_uniqueness_conflicts_map_to_409() {
        let err = AppError::Database(RepositoryError::Conflict(
            "email already registered".to_owned(),
        ));
        assert_eq!(get_status(err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unauthenticated_and_forbidden_stay_distinct() {
        assert_ne!(
            get_status(AppError::Unauthorized("no session".to_owned())),
            get_status(AppError::Forbidden("admin required".to_owned()))
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
