//! Share service: public, token-addressed read access to single notes.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use tracing::{debug, info};

use crate::config::SharingConfig;
use crate::db::{NoteFilter, SharedLinkFilter, Store};
use crate::error::{Error, Result};
use crate::models::{now, NewSharedLink, Note};

/// Random bytes per share token (128 bits).
const TOKEN_BYTES: usize = 16;

/// Service for creating and resolving share links.
#[derive(Clone)]
pub struct ShareService {
    store: Arc<dyn Store>,
    config: SharingConfig,
}

impl ShareService {
    pub fn new(store: Arc<dyn Store>, config: SharingConfig) -> Self {
        Self { store, config }
    }

    /// Create a share link for one of the owner's live notes and return its
    /// public URL.
    ///
    /// Each call mints a fresh token; earlier links for the same note keep
    /// their own expiry.
    pub async fn create(
        &self,
        owner_id: &str,
        note_id: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let note = self
            .store
            .find_note(&NoteFilter::owned(owner_id, note_id))
            .await?
            .ok_or_else(|| Error::NotFound("Note".to_string()))?;

        let token = generate_token();

        let link_id = self
            .store
            .insert_shared_link(NewSharedLink {
                note_id: note.id.clone(),
                token: token.clone(),
                expires_at,
                created_at: now(),
            })
            .await?;

        info!(link_id = %link_id, note_id = %note.id, expires_at = ?expires_at, "Created share link");

        Ok(self.share_url(&token))
    }

    /// Resolve a share token to its note, without any owner check.
    ///
    /// Unknown tokens, expired links and links to deleted notes are all
    /// `NotFound`.
    pub async fn resolve(&self, token: &str) -> Result<Note> {
        let at = now();
        let link = self
            .store
            .find_shared_link(&SharedLinkFilter::active(token, at))
            .await?
            .filter(|link| link.is_active_at(at));

        let Some(link) = link else {
            debug!("Share token did not resolve");
            return Err(Error::NotFound("Shared link".to_string()));
        };

        self.store
            .find_note(&NoteFilter::live(&link.note_id))
            .await?
            .ok_or_else(|| Error::NotFound("Shared link".to_string()))
    }

    fn share_url(&self, token: &str) -> String {
        format!(
            "{}/shared/{}",
            self.config.base_url.trim_end_matches('/'),
            token
        )
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
