//! Database migration command.
//!
//! Migration files live in `crates/server/migrations/` and are embedded at
//! compile time, so the binary can run them anywhere `DATABASE_URL` points.

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the connection or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
