//! Share link database queries.
//!
//! Expired links are filtered out at read time and never purged.

use chrono::{DateTime, Utc};

use crate::models::{new_id, NewSharedLink, SharedLink};
use crate::{Error, Result};

use super::{parse_id, DbPool};

/// Selection criteria for share link lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLinkFilter {
    pub token: String,
    /// When set, only links with no expiry or an expiry after this instant match.
    pub active_at: Option<DateTime<Utc>>,
}

impl SharedLinkFilter {
    pub fn active(token: &str, at: DateTime<Utc>) -> Self {
        Self {
            token: token.to_string(),
            active_at: Some(at),
        }
    }
}

/// Insert a share link and return the generated id.
pub async fn insert_shared_link(pool: &DbPool, input: NewSharedLink) -> Result<String> {
    let id = new_id();
    let note_id = parse_id(&input.note_id, "note")?;

    sqlx::query(
        r#"
        INSERT INTO shared_links (id, note_id, token, expires_at, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(note_id.to_string())
    .bind(&input.token)
    .bind(input.expires_at)
    .bind(input.created_at)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Find a share link by token.
pub async fn find_shared_link(
    pool: &DbPool,
    filter: &SharedLinkFilter,
) -> Result<Option<SharedLink>> {
    match filter.active_at {
        Some(at) => sqlx::query_as::<_, SharedLink>(
            r#"
            SELECT id, note_id, token, expires_at, created_at
            FROM shared_links
            WHERE token = ? AND (expires_at IS NULL OR expires_at > ?)
            "#,
        )
        .bind(&filter.token)
        .bind(at)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database),
        None => sqlx::query_as::<_, SharedLink>(
            r#"
            SELECT id, note_id, token, expires_at, created_at
            FROM shared_links
            WHERE token = ?
            "#,
        )
        .bind(&filter.token)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database),
    }
}
