//! Contact-form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veranda_core::ContactId;

/// An inbound contact-form submission.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Whether an admin has marked the submission as read.
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public contact-form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Admin update for a submission (only the read flag is mutable).
#[derive(Debug, Clone, Deserialize)]
pub struct ContactPatch {
    pub read: bool,
}
