//! Persistence gateway.
//!
//! The services only see [`Store`]: find-one / find-many / insert / update over
//! the users, notes and shared links collections. Identifiers cross this
//! boundary as opaque strings; [`SqliteStore`] checks their syntax and keeps
//! the native representation to itself.

use async_trait::async_trait;

use crate::models::{NewNote, NewSharedLink, NewUser, Note, NotePatch, SharedLink, User};
use crate::Result;

use super::{DbPool, NoteFilter, SharedLinkFilter};

/// User lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(String),
    Email(String),
}

/// Abstract document store backing every service.
///
/// Implementations must make each call individually atomic. No multi-call
/// transactions are assumed; `insert_user` must reject a duplicate email with
/// `Error::EmailTaken`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, filter: &UserFilter) -> Result<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> Result<String>;

    async fn find_note(&self, filter: &NoteFilter) -> Result<Option<Note>>;

    async fn find_notes(&self, filter: &NoteFilter, limit: u32) -> Result<Vec<Note>>;

    async fn insert_note(&self, note: NewNote) -> Result<String>;

    /// Returns false if no live note with `id` exists.
    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<bool>;

    async fn find_shared_link(&self, filter: &SharedLinkFilter) -> Result<Option<SharedLink>>;

    async fn insert_shared_link(&self, link: NewSharedLink) -> Result<String>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<()>;
}

/// [`Store`] over a SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn find_user(&self, filter: &UserFilter) -> Result<Option<User>> {
        match filter {
            UserFilter::Id(id) => super::get_user(&self.pool, id).await,
            UserFilter::Email(email) => super::get_user_by_email(&self.pool, email).await,
        }
    }

    async fn insert_user(&self, user: NewUser) -> Result<String> {
        super::insert_user(&self.pool, user).await
    }

    async fn find_note(&self, filter: &NoteFilter) -> Result<Option<Note>> {
        super::find_note(&self.pool, filter).await
    }

    async fn find_notes(&self, filter: &NoteFilter, limit: u32) -> Result<Vec<Note>> {
        super::find_notes(&self.pool, filter, limit).await
    }

    async fn insert_note(&self, note: NewNote) -> Result<String> {
        super::insert_note(&self.pool, note).await
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<bool> {
        super::update_note(&self.pool, id, patch).await
    }

    async fn find_shared_link(&self, filter: &SharedLinkFilter) -> Result<Option<SharedLink>> {
        super::find_shared_link(&self.pool, filter).await
    }

    async fn insert_shared_link(&self, link: NewSharedLink) -> Result<String> {
        super::insert_shared_link(&self.pool, link).await
    }

    async fn ping(&self) -> Result<()> {
        super::health_check(&self.pool).await
    }
}
