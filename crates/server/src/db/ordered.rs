//! Generic store for ordered content collections.
//!
//! Features, reasons, and slides all behave the same way: rows carry an
//! integer `order` column used only for relative sort, an `active` flag,
//! and a timestamp pair. [`OrderedStore`] implements the CRUD and reorder
//! operations once; each entity contributes its table name and column set
//! through [`OrderedEntity`].
//!
//! Table and column names reaching the dynamic SQL below come only from
//! compile-time constants on the entity impls. Every value is bound as a
//! parameter.

use std::marker::PhantomData;

use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{MySql, MySqlPool};

use veranda_core::{FeatureId, ReasonId, SlideId};

use super::RepositoryError;
use crate::models::{CardDraft, CardPatch, Feature, Reason, Slide, SlideDraft, SlidePatch};

type MySqlQuery<'q> = sqlx::query::Query<'q, MySql, MySqlArguments>;

/// Create payload for an ordered entity.
pub trait ContentDraft {
    /// Column names bound by [`bind`](Self::bind), in bind order.
    fn columns(&self) -> &'static [&'static str];

    /// Bind the draft's column values onto the query, in [`columns`](Self::columns) order.
    fn bind<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;

    /// Initial `active` flag (defaults to true when the payload omits it).
    fn active(&self) -> bool;

    /// Check the required fields before insert. Returns the name of the
    /// first field that is missing or blank.
    fn missing_field(&self) -> Option<&'static str>;
}

/// Partial-update payload for an ordered entity.
pub trait ContentPatch {
    /// Column names for the fields actually present, in bind order.
    fn columns(&self) -> Vec<&'static str>;

    /// Bind the present fields onto the query, in [`columns`](Self::columns) order.
    fn bind<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;

    fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }
}

/// An entity managed by [`OrderedStore`].
pub trait OrderedEntity:
    for<'r> sqlx::FromRow<'r, MySqlRow> + Send + Sync + Unpin + 'static
{
    /// Table name. Must be a compile-time constant; it is interpolated
    /// into SQL text.
    const TABLE: &'static str;

    type Draft: ContentDraft + Send + Sync;
    type Patch: ContentPatch + Send + Sync;

    /// Mint a fresh id for a new row.
    fn new_id() -> String;
}

impl OrderedEntity for Feature {
    const TABLE: &'static str = "features";
    type Draft = CardDraft;
    type Patch = CardPatch;

    fn new_id() -> String {
        FeatureId::generate().into_inner()
    }
}

impl OrderedEntity for Reason {
    const TABLE: &'static str = "reasons";
    type Draft = CardDraft;
    type Patch = CardPatch;

    fn new_id() -> String {
        ReasonId::generate().into_inner()
    }
}

impl OrderedEntity for Slide {
    const TABLE: &'static str = "slides";
    type Draft = SlideDraft;
    type Patch = SlidePatch;

    fn new_id() -> String {
        SlideId::generate().into_inner()
    }
}

impl ContentDraft for CardDraft {
    fn columns(&self) -> &'static [&'static str] {
        &["icon", "title", "description"]
    }

    fn bind<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.icon.as_str())
            .bind(self.title.as_str())
            .bind(self.description.as_str())
    }

    fn active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.icon.trim().is_empty() {
            Some("icon")
        } else if self.title.trim().is_empty() {
            Some("title")
        } else if self.description.trim().is_empty() {
            Some("description")
        } else {
            None
        }
    }
}

impl ContentDraft for SlideDraft {
    fn columns(&self) -> &'static [&'static str] {
        &["title", "image", "link"]
    }

    fn bind<'q>(&'q self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.title.as_str())
            .bind(self.image.as_str())
            .bind(self.link.as_deref())
    }

    fn active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.image.trim().is_empty() {
            Some("image")
        } else {
            None
        }
    }
}

impl ContentPatch for CardPatch {
    fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.icon.is_some() {
            columns.push("icon");
        }
        if self.title.is_some() {
            columns.push("title");
        }
        if self.description.is_some() {
            columns.push("description");
        }
        if self.order.is_some() {
            columns.push("order");
        }
        if self.active.is_some() {
            columns.push("active");
        }
        columns
    }

    fn bind<'q>(&'q self, mut query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        if let Some(ref icon) = self.icon {
            query = query.bind(icon.as_str());
        }
        if let Some(ref title) = self.title {
            query = query.bind(title.as_str());
        }
        if let Some(ref description) = self.description {
            query = query.bind(description.as_str());
        }
        if let Some(order) = self.order {
            query = query.bind(order);
        }
        if let Some(active) = self.active {
            query = query.bind(active);
        }
        query
    }
}

impl ContentPatch for SlidePatch {
    fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.title.is_some() {
            columns.push("title");
        }
        if self.image.is_some() {
            columns.push("image");
        }
        if self.link.is_some() {
            columns.push("link");
        }
        if self.order.is_some() {
            columns.push("order");
        }
        if self.active.is_some() {
            columns.push("active");
        }
        columns
    }

    fn bind<'q>(&'q self, mut query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        if let Some(ref title) = self.title {
            query = query.bind(title.as_str());
        }
        if let Some(ref image) = self.image {
            query = query.bind(image.as_str());
        }
        if let Some(ref link) = self.link {
            query = query.bind(link.as_str());
        }
        if let Some(order) = self.order {
            query = query.bind(order);
        }
        if let Some(active) = self.active {
            query = query.bind(active);
        }
        query
    }
}

/// Generic repository for one ordered collection.
pub struct OrderedStore<'a, E> {
    pool: &'a MySqlPool,
    _entity: PhantomData<E>,
}

impl<'a, E: OrderedEntity> OrderedStore<'a, E> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// List rows sorted by `order`, then creation time for ties.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<E>, RepositoryError> {
        let sql = list_sql(E::TABLE, active_only);
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Fetch one row by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<E>, RepositoryError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a new row at `order = 0` and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails or the row cannot be
    /// read back.
    pub async fn create(&self, draft: &E::Draft) -> Result<E, RepositoryError> {
        let id = E::new_id();
        let sql = insert_sql(E::TABLE, draft.columns());

        let query = sqlx::query(&sql).bind(id.as_str());
        draft.bind(query).bind(draft.active()).execute(self.pool).await?;

        let sql = format!("SELECT * FROM {} WHERE id = ?", E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(row)
    }

    /// Apply a partial update and return the updated row, or `None` if the
    /// id does not exist. An empty patch is a no-op read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn update(&self, id: &str, patch: &E::Patch) -> Result<Option<E>, RepositoryError> {
        if !patch.is_empty() {
            let sql = update_sql(E::TABLE, &patch.columns());
            let query = sqlx::query(&sql);
            patch.bind(query).bind(id).execute(self.pool).await?;
        }
        self.get(id).await
    }

    /// Delete a row. Returns false if the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `order = position + 1` for each id, in one transaction.
    ///
    /// Unknown ids are skipped silently. If an id appears more than once,
    /// its last position wins. Rows not named keep their old `order`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any statement or the commit fails; no
    /// partial reorder is ever visible.
    pub async fn reorder(&self, ids: &[String]) -> Result<(), RepositoryError> {
        let sql = format!("UPDATE {} SET `order` = ? WHERE id = ?", E::TABLE);
        let mut tx = self.pool.begin().await?;
        for (position, id) in ids.iter().enumerate() {
            let order = i32::try_from(position).unwrap_or(i32::MAX).saturating_add(1);
            sqlx::query(&sql)
                .bind(order)
                .bind(id.as_str())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

fn list_sql(table: &str, active_only: bool) -> String {
    let filter = if active_only { " WHERE active = TRUE" } else { "" };
    format!("SELECT * FROM {table}{filter} ORDER BY `order` ASC, created_at ASC")
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let cols = columns.join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!("INSERT INTO {table} (id, {cols}, `order`, active) VALUES (?, {placeholders}, 0, ?)")
}

fn update_sql(table: &str, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns.iter().map(|c| format!("`{c}` = ?")).collect();
    format!("UPDATE {table} SET {} WHERE id = ?", assignments.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sql_orders_by_rank_then_creation() {
        assert_eq!(
            list_sql("features", false),
            "SELECT * FROM features ORDER BY `order` ASC, created_at ASC"
        );
        assert_eq!(
            list_sql("slides", true),
            "SELECT * FROM slides WHERE active = TRUE ORDER BY `order` ASC, created_at ASC"
        );
    }

    #[test]
    fn test_insert_sql_places_new_rows_at_rank_zero() {
        assert_eq!(
            insert_sql("reasons", &["icon", "title", "description"]),
            "INSERT INTO reasons (id, icon, title, description, `order`, active) \
             VALUES (?, ?, ?, ?, 0, ?)"
        );
    }

    #[test]
    fn test_update_sql_backticks_reserved_columns() {
        assert_eq!(
            update_sql("slides", &["title", "order"]),
            "UPDATE slides SET `title` = ?, `order` = ? WHERE id = ?"
        );
    }

    #[test]
    fn test_card_draft_rejects_blank_required_fields() {
        let draft = CardDraft {
            icon: "star".to_owned(),
            title: "  ".to_owned(),
            description: "Fast".to_owned(),
            active: None,
        };
        assert_eq!(draft.missing_field(), Some("title"));

        let draft = CardDraft {
            icon: "star".to_owned(),
            title: "Speed".to_owned(),
            description: "Fast".to_owned(),
            active: None,
        };
        assert_eq!(draft.missing_field(), None);
    }

    #[test]
    fn test_slide_draft_requires_title_and_image() {
        let draft = SlideDraft {
            title: "Hero".to_owned(),
            image: String::new(),
            link: None,
            active: None,
        };
        assert_eq!(draft.missing_field(), Some("image"));

        let draft = SlideDraft {
            title: "Hero".to_owned(),
            image: "/uploads/slides/hero.png".to_owned(),
            link: Some("/pricing".to_owned()),
            active: Some(false),
        };
        assert_eq!(draft.missing_field(), None);
    }

    #[test]
    fn test_card_patch_columns_follow_bind_order() {
        let patch = CardPatch {
            title: Some("T".to_owned()),
            active: Some(false),
            ..CardPatch::default()
        };
        assert_eq!(patch.columns(), vec!["title", "active"]);
        assert!(!patch.is_empty());
        assert!(CardPatch::default().is_empty());
    }
}
