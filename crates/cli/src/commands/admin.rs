//! Admin account creation command.

use std::str::FromStr;

use veranda_core::{Email, Role, UserId};

use super::CommandError;

/// Create a new admin or superadmin account.
///
/// # Errors
///
/// Returns `CommandError` for an invalid email or role, an already existing
/// account, or a database failure.
pub async fn create_user(
    email: &str,
    password: &str,
    name: Option<&str>,
    role: &str,
) -> Result<(), CommandError> {
    let role = Role::from_str(role).map_err(|_| CommandError::InvalidRole(role.to_owned()))?;
    let email = Email::parse(email).map_err(|_| CommandError::InvalidEmail(email.to_owned()))?;

    let pool = super::connect().await?;

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;
    if existing.is_some() {
        return Err(CommandError::UserExists(email.as_str().to_owned()));
    }

    let id = UserId::generate();
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    sqlx::query("INSERT INTO users (id, email, password_hash, name, role) VALUES (?, ?, ?, ?, ?)")
        .bind(id.as_str())
        .bind(email.as_str())
        .bind(&hash)
        .bind(name)
        .bind(role.as_str())
        .execute(&pool)
        .await?;

    tracing::info!("Created {} account: {}", role, email.as_str());
    Ok(())
}
