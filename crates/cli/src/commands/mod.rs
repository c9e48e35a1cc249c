//! CLI subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::MySqlPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid role argument.
    #[error("Invalid role: {0}. Valid roles: admin, superadmin")]
    InvalidRole(String),

    /// Invalid email argument.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Account already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Failed to hash password")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Connect to the database named by `DATABASE_URL`.
pub(crate) async fn connect() -> Result<MySqlPool, CommandError> {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| CommandError::MissingEnvVar("DATABASE_URL"))?;
    Ok(MySqlPool::connect(&database_url).await?)
}
