//! Note service for the owner-facing note lifecycle.
//!
//! Every lookup is scoped to (id, owner, not deleted). A note that does not
//! exist, belongs to someone else, or was soft-deleted is reported the same
//! way: `NotFound`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::NotesConfig;
use crate::db::{NoteFilter, Store};
use crate::error::{Error, Result};
use crate::models::{now, NewNote, Note, NotePatch, NoteUpdate};

/// Service for managing notes.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn Store>,
    config: NotesConfig,
}

impl NoteService {
    /// Create a new note service.
    pub fn new(store: Arc<dyn Store>, config: NotesConfig) -> Self {
        Self { store, config }
    }

    /// Create a note at version 1.
    pub async fn create(
        &self,
        owner_id: &str,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> Result<Note> {
        let created_at = now();

        let id = self
            .store
            .insert_note(NewNote {
                owner_id: owner_id.to_string(),
                title: title.clone(),
                content: content.clone(),
                tags: tags.clone(),
                created_at,
            })
            .await?;

        info!(note_id = %id, owner_id = %owner_id, "Created note");

        Ok(Note {
            id,
            owner_id: owner_id.to_string(),
            title,
            content,
            tags,
            version: 1,
            is_deleted: false,
            created_at,
            updated_at: created_at,
        })
    }

    /// List the owner's live notes, oldest first, up to the configured limit.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Note>> {
        self.store
            .find_notes(&NoteFilter::owned_by(owner_id), self.config.list_limit)
            .await
    }

    /// Get one of the owner's live notes.
    pub async fn get(&self, owner_id: &str, note_id: &str) -> Result<Note> {
        self.store
            .find_note(&NoteFilter::owned(owner_id, note_id))
            .await?
            .ok_or_else(|| Error::NotFound("Note".to_string()))
    }

    /// Apply a partial update and bump the version by one.
    pub async fn update(&self, owner_id: &str, note_id: &str, update: NoteUpdate) -> Result<Note> {
        let existing = self.get(owner_id, note_id).await?;

        let applied = self
            .store
            .update_note(&existing.id, NotePatch::edit(update, now()))
            .await?;
        if !applied {
            return Err(Error::NotFound("Note".to_string()));
        }

        let updated = self.get(owner_id, note_id).await?;

        debug!(note_id = %updated.id, version = updated.version, "Updated note");

        Ok(updated)
    }

    /// Soft-delete one of the owner's notes.
    ///
    /// Deleting an already deleted note is `NotFound`, since it is no longer
    /// visible to its owner.
    pub async fn delete(&self, owner_id: &str, note_id: &str) -> Result<()> {
        let existing = self.get(owner_id, note_id).await?;

        let applied = self
            .store
            .update_note(&existing.id, NotePatch::soft_delete(now()))
            .await?;
        if !applied {
            return Err(Error::NotFound("Note".to_string()));
        }

        info!(note_id = %existing.id, owner_id = %owner_id, "Deleted note");

        Ok(())
    }
}
