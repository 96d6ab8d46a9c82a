//! Request extractors with VoiceNotes error mapping.

use axum::extract::FromRequest;

use crate::error::{Result, ServerError};

/// JSON body extractor whose rejections become `400 Bad Request`.
///
/// Malformed JSON, the wrong shape, and a missing `Content-Type` all map to
/// [`ServerError::BadRequest`] instead of axum's 415/422 defaults.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct JsonBody<T>(pub T);

/// Reject a blank path id before any storage access.
pub fn require_id(id: &str) -> Result<&str> {
    if id.trim().is_empty() {
        return Err(ServerError::BadRequest("Missing id".to_string()));
    }
    Ok(id)
}
