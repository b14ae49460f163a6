//! Note database queries.
//!
//! Notes are never physically deleted; the soft-delete flag hides them from
//! every owner-facing query.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite};

use crate::models::{new_id, NewNote, Note, NotePatch};
use crate::{Error, Result};

use super::{parse_id, DbPool};

// ============================================================================
// Filter Types
// ============================================================================

/// Selection criteria for note lookups.
///
/// Owner-facing reads must set both `id` and `owner_id` and leave
/// `include_deleted` false; use the constructors rather than building this by
/// hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub id: Option<String>,
    pub owner_id: Option<String>,
    pub include_deleted: bool,
}

impl NoteFilter {
    /// A single live note belonging to `owner_id`.
    pub fn owned(owner_id: &str, id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            owner_id: Some(owner_id.to_string()),
            include_deleted: false,
        }
    }

    /// All live notes belonging to `owner_id`.
    pub fn owned_by(owner_id: &str) -> Self {
        Self {
            id: None,
            owner_id: Some(owner_id.to_string()),
            include_deleted: false,
        }
    }

    /// A single live note regardless of owner. Only the public share path
    /// uses this.
    pub fn live(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            owner_id: None,
            include_deleted: false,
        }
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(Debug, FromRow)]
struct NoteRow {
    id: String,
    owner_id: String,
    title: String,
    content: String,
    tags: String, // JSON array
    version: i64,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = Error;

    fn try_from(row: NoteRow) -> Result<Self> {
        Ok(Note {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            content: row.content,
            tags: serde_json::from_str(&row.tags)?,
            version: row.version,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const NOTE_COLUMNS: &str =
    "SELECT id, owner_id, title, content, tags, version, is_deleted, created_at, updated_at FROM notes";

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &NoteFilter) -> Result<()> {
    qb.push(" WHERE 1 = 1");

    if let Some(id) = &filter.id {
        let id = parse_id(id, "note")?;
        qb.push(" AND id = ").push_bind(id.to_string());
    }
    if let Some(owner_id) = &filter.owner_id {
        let owner_id = parse_id(owner_id, "owner")?;
        qb.push(" AND owner_id = ").push_bind(owner_id.to_string());
    }
    if !filter.include_deleted {
        qb.push(" AND is_deleted = 0");
    }

    Ok(())
}

// ============================================================================
// Note Queries
// ============================================================================

/// Insert a note with version 1 and return the generated id.
pub async fn insert_note(pool: &DbPool, input: NewNote) -> Result<String> {
    let id = new_id();
    let owner_id = parse_id(&input.owner_id, "owner")?;
    let tags = serde_json::to_string(&input.tags)?;

    sqlx::query(
        r#"
        INSERT INTO notes (id, owner_id, title, content, tags, version, is_deleted, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 1, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(owner_id.to_string())
    .bind(&input.title)
    .bind(&input.content)
    .bind(&tags)
    .bind(input.created_at)
    .bind(input.created_at)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Find the first note matching `filter`.
pub async fn find_note(pool: &DbPool, filter: &NoteFilter) -> Result<Option<Note>> {
    let mut qb = QueryBuilder::<Sqlite>::new(NOTE_COLUMNS);
    push_filter(&mut qb, filter)?;
    qb.push(" LIMIT 1");

    qb.build_query_as::<NoteRow>()
        .fetch_optional(pool)
        .await?
        .map(Note::try_from)
        .transpose()
}

/// List notes matching `filter`, oldest first, at most `limit` rows.
pub async fn find_notes(pool: &DbPool, filter: &NoteFilter, limit: u32) -> Result<Vec<Note>> {
    let mut qb = QueryBuilder::<Sqlite>::new(NOTE_COLUMNS);
    push_filter(&mut qb, filter)?;
    qb.push(" ORDER BY created_at ASC, id ASC LIMIT ")
        .push_bind(i64::from(limit));

    qb.build_query_as::<NoteRow>()
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Note::try_from)
        .collect()
}

/// Apply `patch` to a live note in a single statement.
///
/// Returns false when no live note has this id, so a note deleted between the
/// caller's lookup and this write is never resurrected or double-bumped.
pub async fn update_note(pool: &DbPool, id: &str, patch: NotePatch) -> Result<bool> {
    let id = parse_id(id, "note")?;

    let mut qb = QueryBuilder::<Sqlite>::new("UPDATE notes SET updated_at = ");
    qb.push_bind(patch.updated_at);

    if let Some(title) = patch.title {
        qb.push(", title = ").push_bind(title);
    }
    if let Some(content) = patch.content {
        qb.push(", content = ").push_bind(content);
    }
    if let Some(tags) = patch.tags {
        qb.push(", tags = ").push_bind(serde_json::to_string(&tags)?);
    }
    if let Some(is_deleted) = patch.is_deleted {
        qb.push(", is_deleted = ").push_bind(is_deleted);
    }
    if patch.bump_version {
        qb.push(", version = version + 1");
    }

    qb.push(" WHERE id = ")
        .push_bind(id.to_string())
        .push(" AND is_deleted = 0");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
