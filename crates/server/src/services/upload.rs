//! Image upload handling.
//!
//! Uploads land under the configured upload directory and are served back
//! at `/uploads/...`. Only `image/*` content up to 5 MB is accepted, and the
//! target folder name is sanitized before it touches the filesystem.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Maximum accepted upload size in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_FOLDER: &str = "general";

/// Folder listed when the library request names none.
const LIBRARY_FOLDER: &str = "posts";

/// Hard cap on library page size.
const MAX_LIBRARY_LIMIT: usize = 200;

/// Result of a stored upload, echoed back to the admin UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    /// Public URL path, e.g. `/uploads/slides/3f2a....webp`.
    pub url: String,
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
}

/// Validate and persist an uploaded image, returning its public URL.
///
/// # Errors
///
/// Returns `AppError::Validation` for non-image content or oversized
/// payloads, and `AppError::Internal` if the file cannot be written.
pub async fn store_image(
    base_dir: &Path,
    folder: Option<&str>,
    original_name: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<StoredUpload, AppError> {
    let content_type = content_type.unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(AppError::Validation("only image uploads are accepted".to_owned()));
    }
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_owned()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation("file exceeds the 5 MB upload limit".to_owned()));
    }

    let folder = sanitize_folder(folder.unwrap_or(DEFAULT_FOLDER));
    let file_name = format!(
        "{}.{}",
        Uuid::new_v4(),
        extension_for(original_name, content_type)
    );

    let dir = base_dir.join(&folder);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload dir: {e}")))?;
    tokio::fs::write(dir.join(&file_name), data)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write upload: {e}")))?;

    Ok(StoredUpload {
        url: format!("/uploads/{folder}/{file_name}"),
        file_name,
        size: data.len(),
        content_type: content_type.to_owned(),
    })
}

/// One file in the image library listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub name: String,
    pub url: String,
    pub size: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List images in one upload folder, newest first.
///
/// A folder that does not exist yet lists as empty rather than erroring.
///
/// # Errors
///
/// Returns `AppError::Internal` if the directory cannot be read.
pub async fn list_images(
    base_dir: &Path,
    folder: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<StoredImage>, AppError> {
    let folder = sanitize_folder(folder.unwrap_or(LIBRARY_FOLDER));
    let limit = limit.unwrap_or(60).min(MAX_LIBRARY_LIMIT);

    let dir = base_dir.join(&folder);
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AppError::Internal(format!("failed to read upload dir: {e}"))),
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(StoredImage {
            url: format!("/uploads/{folder}/{name}"),
            name,
            size: metadata.len(),
            updated_at: metadata.modified().ok().map(DateTime::from),
        });
    }

    files.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    files.truncate(limit);
    Ok(files)
}

/// Delete a stored image by its public URL path. Returns false if no file
/// exists at that path.
///
/// # Errors
///
/// Returns `AppError::Validation` for paths outside the upload directory
/// and `AppError::Internal` if the unlink fails.
pub async fn delete_image(base_dir: &Path, url_path: &str) -> Result<bool, AppError> {
    let relative = stored_path(url_path)
        .ok_or_else(|| AppError::Validation("invalid image path".to_owned()))?;

    match tokio::fs::remove_file(base_dir.join(relative)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::Internal(format!("failed to delete upload: {e}"))),
    }
}

/// Map a public `/uploads/...` URL to a path relative to the upload
/// directory. Anything that could escape it resolves to `None`.
fn stored_path(url_path: &str) -> Option<PathBuf> {
    let relative = url_path
        .strip_prefix("/uploads/")
        .or_else(|| url_path.strip_prefix("uploads/"))?;
    if relative.is_empty() || relative.contains('\\') {
        return None;
    }

    let path = Path::new(relative);
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(path.to_path_buf())
    } else {
        None
    }
}

/// Strip anything that could escape the upload directory. Only ASCII
/// alphanumerics, dashes, and underscores survive.
fn sanitize_folder(folder: &str) -> String {
    let cleaned: String = folder
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        DEFAULT_FOLDER.to_owned()
    } else {
        cleaned
    }
}

/// Pick a file extension: the original name's, when it looks safe, else one
/// derived from the content type.
fn extension_for(original_name: Option<&str>, content_type: &str) -> String {
    if let Some(ext) = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        && !ext.is_empty()
        && ext.len() <= 5
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return ext.to_ascii_lowercase();
    }

    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        _ => "img",
    }
    .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_folder_strips_traversal() {
        assert_eq!(sanitize_folder("../../etc"), "etc");
        assert_eq!(sanitize_folder("slides"), "slides");
        assert_eq!(sanitize_folder("hero_images-2"), "hero_images-2");
        assert_eq!(sanitize_folder("../.."), "general");
        assert_eq!(sanitize_folder(""), "general");
    }

    #[test]
    fn test_extension_prefers_original_name() {
        assert_eq!(extension_for(Some("photo.PNG"), "image/jpeg"), "png");
        assert_eq!(extension_for(Some("no-extension"), "image/webp"), "webp");
        assert_eq!(extension_for(Some("weird.ex!t"), "image/png"), "png");
        assert_eq!(extension_for(None, "image/unknown"), "img");
    }

    #[test]
    fn test_stored_path_rejects_traversal() {
        assert_eq!(
            stored_path("/uploads/posts/a.png"),
            Some(PathBuf::from("posts/a.png"))
        );
        assert_eq!(
            stored_path("uploads/general/b.webp"),
            Some(PathBuf::from("general/b.webp"))
        );
        assert!(stored_path("/uploads/../secrets.txt").is_none());
        assert!(stored_path("/uploads/posts/../../etc/passwd").is_none());
        assert!(stored_path("/uploads/").is_none());
        assert!(stored_path("/etc/passwd").is_none());
        assert!(stored_path("/uploads/posts\\..\\x").is_none());
    }

    #[tokio::test]
    async fn test_library_lists_and_deletes_stored_files() {
        let base = std::env::temp_dir().join(format!("veranda-library-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(base.join("posts")).await.unwrap();
        tokio::fs::write(base.join("posts/a.png"), b"png").await.unwrap();
        tokio::fs::write(base.join("posts/b.webp"), b"webp").await.unwrap();

        let files = list_images(&base, Some("posts"), None).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.url.starts_with("/uploads/posts/")));

        let limited = list_images(&base, Some("posts"), Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);

        assert!(delete_image(&base, "/uploads/posts/a.png").await.unwrap());
        assert!(!delete_image(&base, "/uploads/posts/a.png").await.unwrap());
        let files = list_images(&base, Some("posts"), None).await.unwrap();
        assert_eq!(files.len(), 1);

        tokio::fs::remove_dir_all(&base).await.unwrap();
    }

    #[tokio::test]
    async fn test_library_missing_folder_lists_empty() {
        let base = std::env::temp_dir().join(format!("veranda-library-{}", Uuid::new_v4()));
        let files = list_images(&base, Some("nowhere"), None).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_store_image_rejects_non_images() {
        let err = store_image(Path::new("/tmp"), None, None, Some("text/html"), b"<html>")
            .await
            .err();
        assert!(matches!(err, Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_image_rejects_oversized_payload() {
        let data = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = store_image(Path::new("/tmp"), None, None, Some("image/png"), &data)
            .await
            .err();
        assert!(matches!(err, Some(AppError::Validation(_))));
    }
}
