//! Integration test helpers for Veranda.
//!
//! The tests in `tests/` drive a running server over HTTP. They are ignored
//! by default; run them against a disposable database:
//!
//! ```bash
//! cargo run -p veranda-cli -- migrate
//! cargo run -p veranda-cli -- seed
//! cargo run -p veranda-server &
//! cargo test -p veranda-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `VERANDA_BASE_URL` - server under test (default <http://localhost:3000>)
//! - `VERANDA_TEST_EMAIL` / `VERANDA_TEST_PASSWORD` - admin credentials
//!   (default: the seeded superadmin)

use reqwest::Client;
use serde_json::json;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("VERANDA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// A cookie-holding client plus the base URL it targets.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a client with a cookie store, unauthenticated.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: base_url(),
        }
    }

    /// Sign in with the configured admin credentials; the session cookie
    /// lands in the client's cookie store.
    ///
    /// # Panics
    ///
    /// Panics if the sign-in request fails or is rejected.
    pub async fn sign_in(&self) {
        let email = std::env::var("VERANDA_TEST_EMAIL")
            .unwrap_or_else(|_| "admin@example.com".to_owned());
        let password =
            std::env::var("VERANDA_TEST_PASSWORD").unwrap_or_else(|_| "admin123".to_owned());

        let resp = self
            .client
            .post(format!("{}/api/auth/signin", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send sign-in request");
        assert!(
            resp.status().is_success(),
            "sign-in rejected: {}",
            resp.status()
        );
    }

    /// Convenience for `{base_url}{path}`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
