//! Outbound HTTP client for the chat provider.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::{ChatError, ChatSettings};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed channel identifier sent with every provider call.
const CHANNEL_ID: &str = "web";
const ENVIRONMENT: &str = "prod";

/// Request body for both provider endpoints.
#[derive(Debug, Serialize)]
struct ProviderRequest<'a> {
    bot_uuid: &'a str,
    channel_id: &'static str,
    environment: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// The provider's response body, passed through to the widget unchanged.
#[derive(Debug, Clone)]
pub struct ProviderReply(pub Value);

/// HTTP client for the assistant provider. Cheap to clone.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
}

impl ChatClient {
    #[must_use]
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Open a conversation under the given thread id.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` when the provider call fails.
    pub async fn start_chat(
        &self,
        settings: &ChatSettings,
        thread_id: &str,
    ) -> Result<ProviderReply, ChatError> {
        self.call(settings, "startChat", Some(thread_id), None).await
    }

    /// Send one message on an existing thread.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` when the provider call fails.
    pub async fn send_message(
        &self,
        settings: &ChatSettings,
        thread_id: &str,
        message: &str,
    ) -> Result<ProviderReply, ChatError> {
        self.call(settings, "chat", Some(thread_id), Some(message))
            .await
    }

    async fn call(
        &self,
        settings: &ChatSettings,
        endpoint: &str,
        thread_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<ProviderReply, ChatError> {
        let url = format!("{}/botChat/{endpoint}", settings.api_url);
        let body = ProviderRequest {
            bot_uuid: &settings.assistant_id,
            channel_id: CHANNEL_ID,
            environment: ENVIRONMENT,
            thread_id,
            message,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(ref key) = settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ChatError::Upstream {
                status: response.status().as_u16(),
            });
        }

        let value = response.json::<Value>().await?;
        Ok(ProviderReply(value))
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_carries_the_thread_id() {
        let body = ProviderRequest {
            bot_uuid: "asst-123",
            channel_id: CHANNEL_ID,
            environment: ENVIRONMENT,
            thread_id: Some("t-1"),
            message: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["bot_uuid"], "asst-123");
        assert_eq!(json["channel_id"], "web");
        assert_eq!(json["thread_id"], "t-1");
        assert!(json.get("message").is_none());
    }
}
