//! Ordered content entities: features, reasons, and slides.
//!
//! Features and Reasons are structurally identical "stat card" rows; Slides
//! carry an image and optional link. All three share the ordered-collection
//! semantics: an integer `order` column used only for relative sort, and an
//! `active` flag that hides a row from the public site without removing it
//! from admin listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veranda_core::{FeatureId, ReasonId, SlideId};

/// A feature card shown in the home-page features section.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    /// Icon name or short stat text (e.g., "98%").
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Display rank; relative order only, ties broken arbitrarily.
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reason card shown in the home-page reasons section.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub id: ReasonId,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A hero-carousel slide.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    /// Image URL (typically under `/uploads/...`).
    pub image: String,
    /// Optional click-through link.
    pub link: Option<String>,
    pub order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a feature or reason card.
///
/// New rows always land at `order = 0`; the admin UI issues a reorder right
/// after creation to slot the card into place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Defaults to true when omitted.
    pub active: Option<bool>,
}

/// Partial update for a feature or reason card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub icon: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// Create payload for a slide.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDraft {
    pub title: String,
    pub image: String,
    pub link: Option<String>,
    /// Defaults to true when omitted.
    pub active: Option<bool>,
}

/// Partial update for a slide.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// Bulk reorder payload: the complete id sequence in desired display order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_serializes_camel_case() {
        let feature = Feature {
            id: FeatureId::new("f-1".to_owned()),
            icon: "98%".to_owned(),
            title: "Hài lòng".to_owned(),
            description: "Khách hàng hài lòng với dịch vụ".to_owned(),
            order: 0,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["icon"], "98%");
        assert_eq!(json["order"], 0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_card_patch_deserializes_partial_body() {
        let patch: CardPatch = serde_json::from_str(r#"{"title": "New title"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.icon.is_none());
        assert!(patch.active.is_none());
    }
}
