//! Shared note view.
//!
//! Routes:
//! - GET /shared/:token - Read a shared note without authentication

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::models::Note;
use crate::{AppState, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/:token", get(get_shared_note))
}

/// GET /shared/:token
///
/// Unknown, expired and deleted-note links all return 404.
#[axum::debug_handler]
async fn get_shared_note(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Note>> {
    let note = state.shares.resolve(&token).await?;
    Ok(Json(note))
}
