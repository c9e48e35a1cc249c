//! First-run seeding command.
//!
//! Creates the superadmin account and the site settings row so a fresh
//! deployment can be signed into. Credentials come from `ADMIN_EMAIL` and
//! `ADMIN_PASSWORD`, falling back to well-known defaults that must be
//! changed right after the first sign-in.

use veranda_core::{Role, SiteInfoId, UserId};

use super::CommandError;

const DEFAULT_EMAIL: &str = "admin@example.com";
const DEFAULT_PASSWORD: &str = "admin123";
const DEFAULT_NAME: &str = "Administrator";

/// Seed the superadmin and default site settings.
///
/// An existing account under the seed email is promoted to superadmin and
/// gets its password refreshed instead of erroring out.
///
/// # Errors
///
/// Returns `CommandError` if a query or the password hash fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let (email, password) = credentials_from_env();

    let hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    match existing {
        Some((user_id,)) => {
            sqlx::query("UPDATE users SET role = ?, password_hash = ? WHERE id = ?")
                .bind(Role::Superadmin.as_str())
                .bind(&hash)
                .bind(&user_id)
                .execute(&pool)
                .await?;
            tracing::info!("Refreshed superadmin {email}");
        }
        None => {
            let id = UserId::generate();
            sqlx::query(
                "INSERT INTO users (id, email, password_hash, name, role) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id.as_str())
            .bind(&email)
            .bind(&hash)
            .bind(DEFAULT_NAME)
            .bind(Role::Superadmin.as_str())
            .execute(&pool)
            .await?;
            tracing::info!("Seeded superadmin {email}");
        }
    }

    seed_site_info(&pool).await?;

    if password == DEFAULT_PASSWORD {
        tracing::warn!("Default password in use. Change it after the first sign-in.");
    }
    Ok(())
}

fn credentials_from_env() -> (String, String) {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_owned());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_owned());
    (email, password)
}

/// Insert the settings singleton if no row exists yet. Column defaults in
/// the schema fill in the rest.
async fn seed_site_info(pool: &sqlx::MySqlPool) -> Result<(), CommandError> {
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM site_info LIMIT 1")
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let id = SiteInfoId::generate();
    sqlx::query(
        "INSERT INTO site_info (id, singleton, name, description, author) VALUES (?, 1, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind("AI Platform")
    .bind("Nền tảng khám phá trí tuệ nhân tạo.")
    .bind("AI Platform")
    .execute(pool)
    .await?;
    tracing::info!("Seeded default site settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_fall_back_to_defaults() {
        let (email, password) = credentials_from_env();
        if std::env::var("ADMIN_EMAIL").is_err() {
            assert_eq!(email, DEFAULT_EMAIL);
        }
        if std::env::var("ADMIN_PASSWORD").is_err() {
            assert_eq!(password, DEFAULT_PASSWORD);
        }
    }
}
