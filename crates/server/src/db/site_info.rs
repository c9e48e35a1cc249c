//! Site settings queries.
//!
//! The `site_info` table holds at most one row, enforced by a constant
//! `singleton` column with a unique index. Updates are expressed as an
//! insert-or-update against that index, so two concurrent first writes can
//! never produce two rows.

use sqlx::MySqlPool;

use veranda_core::SiteInfoId;

use super::RepositoryError;
use crate::models::{SiteInfo, SiteInfoPatch};

/// Repository for the `site_info` singleton.
pub struct SiteInfoStore<'a> {
    pool: &'a MySqlPool,
}

impl<'a> SiteInfoStore<'a> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, or the hard-coded fallback when none exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get(&self) -> Result<SiteInfo, RepositoryError> {
        let row = sqlx::query_as::<_, SiteInfo>("SELECT * FROM site_info LIMIT 1")
            .fetch_optional(self.pool)
            .await?;
        Ok(row.unwrap_or_else(SiteInfo::fallback))
    }

    /// Apply a partial update, creating the row if it does not exist yet,
    /// and return the resulting settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn upsert(
        &self,
        patch: &SiteInfoPatch,
        updated_by: Option<&str>,
    ) -> Result<SiteInfo, RepositoryError> {
        if patch.is_empty() {
            return self.get().await;
        }

        let sql = upsert_sql(&patch.columns());
        let id = SiteInfoId::generate();
        let query = sqlx::query(&sql).bind(id.as_str());
        patch
            .bind(query)
            .bind(updated_by)
            .execute(self.pool)
            .await?;

        self.get().await
    }
}

fn upsert_sql(columns: &[&str]) -> String {
    let cols = columns.join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    let mut assignments: Vec<String> = columns.iter().map(|c| format!("{c} = new.{c}")).collect();
    assignments.push("updated_by = new.updated_by".to_owned());
    format!(
        "INSERT INTO site_info (id, singleton, {cols}, updated_by) \
         VALUES (?, 1, {placeholders}, ?) AS new \
         ON DUPLICATE KEY UPDATE {}",
        assignments.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_sql_targets_singleton_index() {
        assert_eq!(
            upsert_sql(&["title", "chat_enabled"]),
            "INSERT INTO site_info (id, singleton, title, chat_enabled, updated_by) \
             VALUES (?, 1, ?, ?, ?) AS new \
             ON DUPLICATE KEY UPDATE title = new.title, chat_enabled = new.chat_enabled, \
             updated_by = new.updated_by"
        );
    }
}
