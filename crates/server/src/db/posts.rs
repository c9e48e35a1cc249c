//! Blog post queries.

use sqlx::MySqlPool;

use veranda_core::{PostId, UserId};

use super::RepositoryError;
use crate::models::{Post, PostDraft, PostPage, PostPatch, PostRow};

const SELECT_WITH_AUTHOR: &str = "SELECT p.*, u.name AS author_name, u.image AS author_image \
     FROM posts p LEFT JOIN users u ON u.id = p.author_id";

/// Repository for the `posts` table.
pub struct PostRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> PostRepository<'a> {
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Paged admin listing, newest first, drafts included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn list_page(&self, page: i64, per_page: i64) -> Result<PostPage, RepositoryError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let offset = (page - 1) * per_page;

        let sql = format!("{SELECT_WITH_AUTHOR} ORDER BY p.created_at DESC LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(per_page)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;

        Ok(PostPage {
            posts: rows.into_iter().map(Post::from).collect(),
            total,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Published posts for the public site, newest publication first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list_published(&self) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "{SELECT_WITH_AUTHOR} WHERE p.published = TRUE \
             ORDER BY p.published_at DESC, p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Fetch one post by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.id = ?");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Post::from))
    }

    /// Fetch one published post by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.slug = ? AND p.published = TRUE");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Post::from))
    }

    /// Create a post and return it.
    ///
    /// Publishing at creation time stamps `published_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the slug is already taken.
    pub async fn create(
        &self,
        draft: &PostDraft,
        author_id: &UserId,
    ) -> Result<Post, RepositoryError> {
        let id = PostId::generate();
        let published = draft.published.unwrap_or(false);
        sqlx::query(
            "INSERT INTO posts \
             (id, title, slug, content, excerpt, cover_image, published, author_id, published_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, IF(?, NOW(), NULL))",
        )
        .bind(id.as_str())
        .bind(draft.title.as_str())
        .bind(draft.slug.as_str())
        .bind(draft.content.as_str())
        .bind(draft.excerpt.as_deref())
        .bind(draft.cover_image.as_deref())
        .bind(published)
        .bind(author_id.as_str())
        .bind(published)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already in use"))?;

        let sql = format!("{SELECT_WITH_AUTHOR} WHERE p.id = ?");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(Post::from(row))
    }

    /// Apply a partial update and return the updated post, or `None` if the
    /// id does not exist. Flipping `published` to true stamps `published_at`
    /// if it was never set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when a new slug is already taken.
    pub async fn update(
        &self,
        id: &PostId,
        patch: &PostPatch,
    ) -> Result<Option<Post>, RepositoryError> {
        let mut assignments = Vec::new();
        if patch.title.is_some() {
            assignments.push("title = ?");
        }
        if patch.slug.is_some() {
            assignments.push("slug = ?");
        }
        if patch.content.is_some() {
            assignments.push("content = ?");
        }
        if patch.excerpt.is_some() {
            assignments.push("excerpt = ?");
        }
        if patch.cover_image.is_some() {
            assignments.push("cover_image = ?");
        }
        if patch.published.is_some() {
            assignments.push("published = ?");
            assignments.push("published_at = IF(? AND published_at IS NULL, NOW(), published_at)");
        }

        if !assignments.is_empty() {
            let sql = format!("UPDATE posts SET {} WHERE id = ?", assignments.join(", "));
            let mut query = sqlx::query(&sql);
            if let Some(ref title) = patch.title {
                query = query.bind(title.as_str());
            }
            if let Some(ref slug) = patch.slug {
                query = query.bind(slug.as_str());
            }
            if let Some(ref content) = patch.content {
                query = query.bind(content.as_str());
            }
            if let Some(ref excerpt) = patch.excerpt {
                query = query.bind(excerpt.as_str());
            }
            if let Some(ref cover_image) = patch.cover_image {
                query = query.bind(cover_image.as_str());
            }
            if let Some(published) = patch.published {
                query = query.bind(published).bind(published);
            }
            query
                .bind(id.as_str())
                .execute(self.pool)
                .await
                .map_err(|e| RepositoryError::from_sqlx(e, "slug already in use"))?;
        }

        self.get(id).await
    }

    /// Delete a post. Returns false if the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Ceiling division on stable integer arithmetic. Inputs are already
/// clamped positive by `list_page`.
fn total_pages(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::total_pages;

    #[test]
    fn test_total_pages_rounds_up_partial_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(1, 100), 1);
    }
}
