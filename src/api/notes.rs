//! Notes Routes
//!
//! Owner-scoped note operations. Every route here sits behind
//! `require_auth`, and a note owned by someone else is indistinguishable from
//! a missing one.
//!
//! Routes:
//! - GET /notes - List the caller's notes
//! - POST /notes - Create a note
//! - GET /notes/:id - Get a note
//! - PUT /notes/:id - Partially update a note
//! - DELETE /notes/:id - Soft-delete a note
//! - POST /notes/:id/share - Create a public share link

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::AuthUser;
use crate::models::{Note, NoteUpdate};
use crate::{AppState, Error, Result};

/// Build note routes.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route("/:id", get(get_note).put(update_note).delete(delete_note))
        .route("/:id/share", post(create_share))
        .layer(axum::middleware::from_fn_with_state(
            state,
            crate::middleware::require_auth,
        ))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Request to share a note. Without `expiresAt` the link never expires.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// List the caller's notes.
///
/// GET /notes
#[axum::debug_handler]
async fn list_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Note>>> {
    let notes = state.notes.list(&auth.user_id).await?;
    Ok(Json(notes))
}

/// Create a note.
///
/// POST /notes
#[axum::debug_handler]
async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let note = state
        .notes
        .create(&auth.user_id, request.title, request.content, request.tags)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: note.id })))
}

/// Get one of the caller's notes.
///
/// GET /notes/:id
#[axum::debug_handler]
async fn get_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let note = state.notes.get(&auth.user_id, &id).await?;
    Ok(Json(note))
}

/// Update one of the caller's notes.
///
/// PUT /notes/:id
///
/// Only the supplied fields change. The version goes up by one per call.
#[axum::debug_handler]
async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(update): Json<NoteUpdate>,
) -> Result<Json<MessageResponse>> {
    state.notes.update(&auth.user_id, &id, update).await?;
    Ok(Json(MessageResponse {
        message: "Note updated successfully",
    }))
}

/// Soft-delete one of the caller's notes.
///
/// DELETE /notes/:id
#[axum::debug_handler]
async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.notes.delete(&auth.user_id, &id).await?;
    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}

/// Create a share link for one of the caller's notes.
///
/// POST /notes/:id/share
///
/// The body is optional; an empty body creates a link that never expires. A
/// body that is present but does not parse is rejected with 400.
#[axum::debug_handler]
async fn create_share(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ShareResponse>> {
    let request = parse_share_request(&body)?;

    let share_url = state
        .shares
        .create(&auth.user_id, &id, request.expires_at)
        .await?;

    Ok(Json(ShareResponse { share_url }))
}

fn parse_share_request(body: &[u8]) -> Result<ShareRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ShareRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("Invalid share request: {}", e)))
}
