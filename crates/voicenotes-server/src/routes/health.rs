//! Liveness endpoint.

/// Text returned by `GET /api/`.
pub const LIVENESS_MESSAGE: &str = "VoiceNotes API работает! 🎤";

/// Plain-text liveness check.
pub async fn liveness_handler() -> &'static str {
    LIVENESS_MESSAGE
}
