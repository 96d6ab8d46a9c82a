//! Reminder endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use voicenotes_store::Reminder;

use crate::error::{Result, ServerError};
use crate::extract::{JsonBody, require_id};
use crate::state::AppState;

/// Query for `PATCH /api/reminders/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CompletedQuery {
    pub completed: Option<String>,
}

impl CompletedQuery {
    /// `true` only for a case-insensitive "true"; anything else is `false`.
    pub fn is_completed(&self) -> bool {
        self.completed
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// GET /api/reminders
pub async fn list_reminders_handler(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    Json(state.storage.list_reminders())
}

/// POST /api/reminders
pub async fn create_reminder_handler(
    State(state): State<AppState>,
    JsonBody(reminder): JsonBody<Reminder>,
) -> (StatusCode, Json<Reminder>) {
    let reminder = state.storage.add_reminder(reminder);
    info!(
        reminder_id = %reminder.id,
        note_id = %reminder.note_id,
        reminder_time = %reminder.reminder_time,
        "Reminder created"
    );
    (StatusCode::CREATED, Json(reminder))
}

/// PATCH /api/reminders/{id}?completed={bool}
pub async fn update_reminder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CompletedQuery>,
) -> Result<Json<Reminder>> {
    let id = require_id(&id)?;
    state
        .storage
        .update_reminder(id, query.is_completed())
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Reminder {} not found", id)))
}
