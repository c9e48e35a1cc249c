//! Credential checks.
//!
//! Sign-in failures are deliberately uniform: an unknown email, a wrong
//! password, and a passwordless account all produce the same 401 message,
//! so the endpoint does not leak which emails exist.

use sqlx::MySqlPool;

use veranda_core::{Email, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Minimum accepted password length for password changes and new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Verify email and password, returning the matching user.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` with a uniform message on any
/// credential mismatch, or `AppError::Database` if a query fails.
pub async fn sign_in(pool: &MySqlPool, email: &str, password: &str) -> Result<User, AppError> {
    let Ok(email) = Email::parse(email) else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
    };

    let user = UserRepository::new(pool)
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()))?;

    let Some(ref hash) = user.password_hash else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
    };

    if !bcrypt::verify(password, hash).unwrap_or(false) {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
    }

    Ok(user)
}

/// Change a user's password after verifying the current one.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the current password does not
/// match, `AppError::Validation` when the new password is too short, or
/// `AppError::Database` if a query fails.
pub async fn change_password(
    pool: &MySqlPool,
    user_id: &UserId,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let users = UserRepository::new(pool);
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;

    let matches = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| bcrypt::verify(current_password, hash).unwrap_or(false));
    if !matches {
        return Err(AppError::Unauthorized("current password is incorrect".to_owned()));
    }

    let hash = hash_password(new_password)?;
    users.set_password_hash(user_id, &hash).await?;
    Ok(())
}

/// Hash a password for storage.
///
/// # Errors
///
/// Returns `AppError::Internal` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|_| AppError::Internal("failed to hash password".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password("admin123").unwrap();
        assert!(bcrypt::verify("admin123", &hash).unwrap());
        assert!(!bcrypt::verify("admin124", &hash).unwrap());
    }
}
