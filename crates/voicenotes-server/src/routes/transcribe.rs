//! Audio transcription endpoint.
//!
//! The upload is streamed into a temporary file that lives only as long as
//! the request. The note is updated only after the gateway succeeds.

use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use voicenotes_store::NoteUpdate;

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Suffix used when the uploaded file name has no extension.
pub const DEFAULT_AUDIO_SUFFIX: &str = ".webm";

/// Name of the text part carrying the note id.
const NOTE_ID_FIELD: &str = "noteId";

/// Response from a successful transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    /// Transcribed text, also stored on the note.
    pub text: String,
    /// The note that was updated.
    pub note_id: String,
}

/// Audio buffered from a multipart file part.
struct BufferedAudio {
    file: NamedTempFile,
    bytes: usize,
}

/// Temp-file suffix derived from the client's file name.
fn audio_suffix(file_name: Option<&str>) -> String {
    file_name
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| DEFAULT_AUDIO_SUFFIX.to_string())
}

async fn buffer_field(mut field: axum::extract::multipart::Field<'_>) -> Result<BufferedAudio> {
    let temp = tempfile::Builder::new()
        .prefix("voicenote-")
        .suffix(&audio_suffix(field.file_name()))
        .tempfile()?;

    let mut out = tokio::fs::File::from_std(temp.reopen()?);
    let mut bytes = 0;
    while let Some(chunk) = field.chunk().await? {
        bytes += chunk.len();
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    Ok(BufferedAudio { file: temp, bytes })
}

/// POST /api/transcribe
///
/// Expects one file part (any field name) and a `noteId` text part. The first
/// file part wins; later ones are drained and ignored.
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>> {
    let mut audio: Option<BufferedAudio> = None;
    let mut note_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            if audio.is_none() {
                audio = Some(buffer_field(field).await?);
            }
        } else if field.name() == Some(NOTE_ID_FIELD) {
            note_id = Some(field.text().await?);
        }
    }

    let audio =
        audio.ok_or_else(|| ServerError::BadRequest("Missing audio file part".to_string()))?;
    let note_id = note_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Missing noteId".to_string()))?;

    if state.storage.get_note(&note_id).is_none() {
        return Err(ServerError::NotFound(format!("Note {} not found", note_id)));
    }

    debug!(
        note_id = %note_id,
        bytes = audio.bytes,
        gateway = state.gateway.name(),
        "Transcribing audio"
    );

    let result = state.gateway.transcribe_audio(audio.file.path()).await;
    if let Err(e) = audio.file.close() {
        warn!(error = %e, "Failed to remove temporary audio file");
    }
    let text = result?;

    state
        .storage
        .update_note(&note_id, &NoteUpdate::transcription(text.clone()))
        .ok_or_else(|| ServerError::NotFound(format!("Note {} not found", note_id)))?;

    info!(note_id = %note_id, chars = text.chars().count(), "Note transcribed");
    Ok(Json(TranscriptionResponse { text, note_id }))
}
