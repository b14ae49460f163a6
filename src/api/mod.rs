//! API Routes for notevault
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod auth;
mod notes;
mod shared;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
///
/// Route structure:
/// - /auth/* - Signup and login (public)
/// - /notes/* - Note CRUD and share link creation (bearer token)
/// - /shared/:token - Shared note view (public)
/// - /health - Health check (public)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health endpoint (public)
        .merge(status::routes())
        // Authentication routes (public)
        .nest("/auth", auth::routes())
        // Share link resolution (public, token in path)
        .nest("/shared", shared::routes())
        // Protected note routes
        .nest("/notes", notes::routes(state))
}
