//! Application state for notevault.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use tracing::warn;

use crate::config::Config;
use crate::db::{SqliteStore, Store};
use crate::services::{AuthService, NoteService, PasswordService, ShareService, TokenService};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway shared by every service.
    pub store: Arc<dyn Store>,
    /// Signup, login and bearer token resolution.
    pub auth: AuthService,
    /// Owner-scoped note lifecycle.
    pub notes: NoteService,
    /// Share link creation and public resolution.
    pub shares: ShareService,
}

impl AppState {
    /// Create a new application state from the global configuration.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        // Initialize database
        let db = crate::db::init_pool(&config.database.path).await?;

        // Initialize database schema
        crate::db::initialize_schema(&db).await?;

        Self::from_parts(Arc::new(SqliteStore::new(db)), config)
    }

    /// Wire the services over an existing store.
    pub fn from_parts(store: Arc<dyn Store>, config: &Config) -> Result<Self> {
        let secret = if config.auth.jwt_secret.is_empty() {
            warn!("JWT_SECRET is not set; generated a per-process secret, tokens will not survive a restart");
            nanoid::nanoid!(64)
        } else {
            config.auth.jwt_secret.clone()
        };

        let tokens = TokenService::new(
            secret.as_bytes(),
            config.auth.jwt_algorithm,
            chrono::Duration::minutes(config.auth.token_ttl_minutes),
        );
        let passwords = PasswordService::new(config.auth.password)?;

        let auth = AuthService::new(store.clone(), passwords, tokens);
        let notes = NoteService::new(store.clone(), config.notes.clone());
        let shares = ShareService::new(store.clone(), config.sharing.clone());

        Ok(Self {
            store,
            auth,
            notes,
            shares,
        })
    }
}
