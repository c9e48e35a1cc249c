//! Theme color configuration entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veranda_core::ColorConfigId;

/// A named theme color (e.g., `primary` -> `#0ea5e9`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub id: ColorConfigId,
    pub key: String,
    pub value: String,
    pub rgb_value: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a theme color, keyed by `key`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorUpsert {
    pub key: String,
    pub value: String,
    pub rgb_value: Option<String>,
    pub description: Option<String>,
}
