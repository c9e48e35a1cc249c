//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::chat::ChatClient;
use crate::config::AppConfig;
use crate::services::TokenService;

/// Application state shared across all handlers.
///
/// Cheap to clone: the inner data lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: MySqlPool,
    chat_client: ChatClient,
    tokens: TokenService,
}

impl AppState {
    /// Build the shared state from loaded configuration and a live pool.
    #[must_use]
    pub fn new(config: AppConfig, pool: MySqlPool) -> Self {
        let chat_client = ChatClient::new();
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_days);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                chat_client,
                tokens,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.inner.pool
    }

    /// Outbound client for the external chat provider.
    #[must_use]
    pub fn chat(&self) -> &ChatClient {
        &self.inner.chat_client
    }

    /// Session token signer/verifier.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
