//! Chat-widget proxy to the external assistant provider.
//!
//! The browser never talks to the provider directly: the widget posts to our
//! API, which injects the assistant credentials and forwards the call. The
//! provider configuration lives in the site settings row, with environment
//! variables as fallback for fields the row leaves empty.

mod client;
mod error;

pub use client::{ChatClient, ProviderReply};
pub use error::ChatError;

use crate::config::ChatFallbackConfig;
use crate::models::SiteInfo;

/// Effective provider configuration for one request.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Provider API base URL.
    pub api_url: String,
    /// Assistant identifier passed as `bot_uuid`.
    pub assistant_id: String,
    /// Optional bearer credential for the provider.
    pub api_key: Option<String>,
}

impl ChatSettings {
    /// Resolve the working configuration from site settings, falling back to
    /// the environment for empty fields.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Disabled` when the widget is switched off and
    /// `ChatError::NotConfigured` when no provider URL or assistant id is
    /// available from either source.
    pub fn resolve(info: &SiteInfo, fallback: &ChatFallbackConfig) -> Result<Self, ChatError> {
        if !info.chat_enabled {
            return Err(ChatError::Disabled);
        }

        let api_url = non_empty(info.chat_api_url.as_deref())
            .or_else(|| non_empty(fallback.api_url.as_deref()))
            .ok_or(ChatError::NotConfigured)?;
        let assistant_id = non_empty(info.chat_assistant_id.as_deref())
            .or_else(|| non_empty(fallback.assistant_id.as_deref()))
            .ok_or(ChatError::NotConfigured)?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            assistant_id,
            api_key: non_empty(info.chat_api_key.as_deref()),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn enabled_info() -> SiteInfo {
        let mut info = SiteInfo::fallback();
        info.chat_enabled = true;
        info.chat_api_url = Some("https://bot.example.com/api/".to_owned());
        info.chat_assistant_id = Some("asst-123".to_owned());
        info
    }

    #[test]
    fn test_resolve_prefers_settings_row() {
        let fallback = ChatFallbackConfig {
            api_url: Some("https://env.example.com".to_owned()),
            assistant_id: Some("asst-env".to_owned()),
        };
        let settings = ChatSettings::resolve(&enabled_info(), &fallback).unwrap();
        assert_eq!(settings.api_url, "https://bot.example.com/api");
        assert_eq!(settings.assistant_id, "asst-123");
    }

    #[test]
    fn test_resolve_falls_back_per_field() {
        let mut info = enabled_info();
        info.chat_assistant_id = Some("   ".to_owned());
        let fallback = ChatFallbackConfig {
            api_url: None,
            assistant_id: Some("asst-env".to_owned()),
        };
        let settings = ChatSettings::resolve(&info, &fallback).unwrap();
        assert_eq!(settings.assistant_id, "asst-env");
    }

    #[test]
    fn test_resolve_disabled_wins_over_configuration() {
        let mut info = enabled_info();
        info.chat_enabled = false;
        let err = ChatSettings::resolve(&info, &ChatFallbackConfig::default()).unwrap_err();
        assert!(matches!(err, ChatError::Disabled));
    }

    #[test]
    fn test_resolve_unconfigured() {
        let mut info = enabled_info();
        info.chat_api_url = None;
        let err = ChatSettings::resolve(&info, &ChatFallbackConfig::default()).unwrap_err();
        assert!(matches!(err, ChatError::NotConfigured));
    }
}
