//! Contact-form submission queries.

use sqlx::MySqlPool;

use veranda_core::ContactId;

use super::RepositoryError;
use crate::models::{Contact, ContactDraft};

/// Repository for the `contacts` table.
pub struct ContactRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> ContactRepository<'a> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let contacts =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY created_at DESC")
                .fetch_all(self.pool)
                .await?;
        Ok(contacts)
    }

    /// Record a submission from the public contact form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    pub async fn create(&self, draft: &ContactDraft) -> Result<Contact, RepositoryError> {
        let id = ContactId::generate();
        sqlx::query(
            "INSERT INTO contacts (id, name, email, phone, subject, message) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(draft.name.as_str())
        .bind(draft.email.as_str())
        .bind(draft.phone.as_deref())
        .bind(draft.subject.as_str())
        .bind(draft.message.as_str())
        .execute(self.pool)
        .await?;

        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = ?")
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(contact)
    }

    /// Set the read flag. Returns the row, or `None` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn set_read(
        &self,
        id: &ContactId,
        read: bool,
    ) -> Result<Option<Contact>, RepositoryError> {
        sqlx::query("UPDATE contacts SET `read` = ? WHERE id = ?")
            .bind(read)
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(contact)
    }

    /// Delete a submission. Returns false if the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: &ContactId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
