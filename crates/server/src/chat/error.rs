//! Chat proxy error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors from the chat proxy.
///
/// Configuration problems surface as 503 so the widget can hide itself;
/// provider failures surface as 502.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The widget is switched off in site settings.
    #[error("chat is currently disabled")]
    Disabled,

    /// No provider URL or assistant id is configured anywhere.
    #[error("chat is not configured")]
    NotConfigured,

    /// The provider answered with a non-success status.
    #[error("chat provider returned status {status}")]
    Upstream { status: u16 },

    /// The provider request failed before a response arrived.
    #[error("chat provider request failed")]
    Request(#[from] reqwest::Error),
}

impl ChatError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Disabled | Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. } | Self::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_unavailable() {
        assert_eq!(ChatError::Disabled.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ChatError::NotConfigured.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_provider_errors_are_bad_gateway() {
        assert_eq!(
            ChatError::Upstream { status: 500 }.status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
