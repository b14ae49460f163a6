//! Share link models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A public, token-addressed pointer to a note. Carries no owner.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SharedLink {
    #[serde(rename = "_id")]
    pub id: String,
    pub note_id: String,
    pub token: String,
    /// `None` means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SharedLink {
    /// Whether the link still resolves at `at`.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp > at).unwrap_or(true)
    }
}

#[derive(Debug, Clone)]
pub struct NewSharedLink {
    pub note_id: String,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
