//! User account queries.

use sqlx::MySqlPool;

use veranda_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::{User, UserPatch};

/// Repository for the `users` table.
pub struct UserRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> UserRepository<'a> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch a user by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// List all accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Create an account and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the email is already taken.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: Option<&str>,
        role: Role,
    ) -> Result<User, RepositoryError> {
        let id = UserId::generate();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, role) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .bind(name)
        .bind(role.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already registered"))?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(user)
    }

    /// Apply a profile patch (name, image). An empty patch is a no-op read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn update_profile(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        if !patch.is_empty() {
            let mut assignments = Vec::new();
            if patch.name.is_some() {
                assignments.push("name = ?");
            }
            if patch.image.is_some() {
                assignments.push("image = ?");
            }
            let sql = format!("UPDATE users SET {} WHERE id = ?", assignments.join(", "));

            let mut query = sqlx::query(&sql);
            if let Some(ref name) = patch.name {
                query = query.bind(name.as_str());
            }
            if let Some(ref image) = patch.image {
                query = query.bind(image.as_str());
            }
            query.bind(id.as_str()).execute(self.pool).await?;
        }
        self.find_by_id(id).await
    }

    /// Change an account's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn set_role(&self, id: &UserId, role: Role) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace an account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an account. Returns false if the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
