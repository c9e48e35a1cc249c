//! Theme color queries.

use sqlx::MySqlPool;

use veranda_core::ColorConfigId;

use super::RepositoryError;
use crate::models::{ColorConfig, ColorUpsert};

/// Repository for the `color_configs` table.
pub struct ColorRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> ColorRepository<'a> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List all theme colors, stable by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<ColorConfig>, RepositoryError> {
        let colors =
            sqlx::query_as::<_, ColorConfig>("SELECT * FROM color_configs ORDER BY `key` ASC")
                .fetch_all(self.pool)
                .await?;
        Ok(colors)
    }

    /// Insert or update a color by its key and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn upsert(&self, payload: &ColorUpsert) -> Result<ColorConfig, RepositoryError> {
        sqlx::query(
            "INSERT INTO color_configs (id, `key`, value, rgb_value, description) \
             VALUES (?, ?, ?, ?, ?) AS new \
             ON DUPLICATE KEY UPDATE value = new.value, rgb_value = new.rgb_value, \
             description = new.description",
        )
        .bind(ColorConfigId::generate().as_str())
        .bind(payload.key.as_str())
        .bind(payload.value.as_str())
        .bind(payload.rgb_value.as_deref())
        .bind(payload.description.as_deref())
        .execute(self.pool)
        .await?;

        let color = sqlx::query_as::<_, ColorConfig>("SELECT * FROM color_configs WHERE `key` = ?")
            .bind(payload.key.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(color)
    }

    /// Delete a color by key. Returns false if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM color_configs WHERE `key` = ?")
            .bind(key)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
