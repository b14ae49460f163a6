//! Note models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A private note. Field names on the wire follow the document layout
/// clients already consume (`_id`, `ownerId`, `isDeleted`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Starts at 1 and grows by one per successful update.
    pub version: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a note. The store assigns the id, version 1 and an
/// unset soft-delete flag.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update supplied by a note's owner. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Store-level change set applied by `Store::update_note`.
#[derive(Debug, Clone)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_deleted: Option<bool>,
    /// Increment `version` by exactly one in the same statement.
    pub bump_version: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotePatch {
    /// Patch for an owner edit: supplied fields plus a version bump.
    pub fn edit(update: NoteUpdate, at: DateTime<Utc>) -> Self {
        Self {
            title: update.title,
            content: update.content,
            tags: update.tags,
            is_deleted: None,
            bump_version: true,
            updated_at: at,
        }
    }

    /// Patch that soft-deletes a note.
    pub fn soft_delete(at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            content: None,
            tags: None,
            is_deleted: Some(true),
            bump_version: false,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let now = Utc::now();
        let note = Note {
            id: "n1".to_string(),
            owner_id: "u1".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            tags: vec!["x".to_string()],
            version: 1,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["_id"], "n1");
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["version"], 1);
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn test_note_update_partial_deserialize() {
        let update: NoteUpdate = serde_json::from_str(r#"{"content":"B"}"#).unwrap();
        assert!(update.title.is_none());
        assert_eq!(update.content.as_deref(), Some("B"));
        assert!(update.tags.is_none());

        let empty: NoteUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.title.is_none() && empty.content.is_none() && empty.tags.is_none());
    }

    #[test]
    fn test_patch_constructors() {
        let at = Utc::now();
        let edit = NotePatch::edit(NoteUpdate::default(), at);
        assert!(edit.bump_version);
        assert!(edit.is_deleted.is_none());

        let delete = NotePatch::soft_delete(at);
        assert!(!delete.bump_version);
        assert_eq!(delete.is_deleted, Some(true));
    }
}
