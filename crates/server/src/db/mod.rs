//! Database operations (MySQL via sqlx).
//!
//! ## Tables
//!
//! - `users` - accounts and roles
//! - `features` / `reasons` - ordered stat cards (one generic store)
//! - `slides` - ordered hero slides (same generic store)
//! - `site_info` - singleton settings row (unique `singleton` column)
//! - `posts` - blog posts
//! - `contacts` - contact-form submissions
//! - `color_configs` - theme colors
//!
//! All queries are hand-written parameterized SQL; table names reaching
//! dynamic statements come only from compile-time constants.
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p veranda-cli -- migrate
//! ```

pub mod colors;
pub mod contacts;
pub mod ordered;
pub mod posts;
pub mod site_info;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use thiserror::Error;

pub use colors::ColorRepository;
pub use contacts::ContactRepository;
pub use ordered::OrderedStore;
pub use posts::PostRepository;
pub use site_info::SiteInfoStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email or slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, converting unique violations into `Conflict`.
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a MySQL connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
