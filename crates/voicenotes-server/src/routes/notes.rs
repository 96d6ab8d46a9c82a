//! Note endpoints.
//!
//! Notes are created with an empty transcription, patched piecewise, and
//! deleted without touching the reminders that point at them.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use voicenotes_store::{Note, NoteUpdate, Reminder};

use crate::error::{Result, ServerError};
use crate::extract::{JsonBody, require_id};
use crate::state::AppState;

/// Request to create a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Note title.
    pub title: String,
    /// Optional category reference. Not checked against existing categories.
    #[serde(default)]
    pub category_id: Option<String>,
}

fn not_found(id: &str) -> ServerError {
    ServerError::NotFound(format!("Note {} not found", id))
}

/// GET /api/notes
pub async fn list_notes_handler(State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.storage.list_notes())
}

/// POST /api/notes
pub async fn create_note_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> (StatusCode, Json<Note>) {
    let note = Note::new(request.title).with_category(request.category_id);
    let note = state.storage.add_note(note);

    info!(note_id = %note.id, "Note created");
    (StatusCode::CREATED, Json(note))
}

/// GET /api/notes/{id}
pub async fn get_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let id = require_id(&id)?;
    state
        .storage
        .get_note(id)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PATCH /api/notes/{id}
///
/// Absent fields are kept; `aiReport` cannot be set through this route.
pub async fn update_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<NoteUpdate>,
) -> Result<Json<Note>> {
    let id = require_id(&id)?;
    let note = state
        .storage
        .update_note(id, &update)
        .ok_or_else(|| not_found(id))?;

    debug!(note_id = %id, empty_patch = update.is_empty(), "Note updated");
    Ok(Json(note))
}

/// DELETE /api/notes/{id}
pub async fn delete_note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = require_id(&id)?;
    if !state.storage.delete_note(id) {
        return Err(not_found(id));
    }

    info!(note_id = %id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/notes/{id}/reminders
///
/// Reminders are weak references, so an unknown note simply has none.
pub async fn note_reminders_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Reminder>>> {
    let id = require_id(&id)?;
    Ok(Json(state.storage.reminders_for_note(id)))
}
