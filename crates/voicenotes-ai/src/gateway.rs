//! AI gateway trait and test double.
//!
//! The API layer depends only on [`AiGateway`]. Provider request/response
//! shapes stay inside the implementations, so swapping providers never touches
//! the handlers.

use std::path::Path;
#[cfg(any(test, feature = "testing"))]
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Instructional prompt sent alongside every transcription for report
/// generation.
pub const BUSINESS_REPORT_PROMPT: &str = "You are a business analyst. You receive the \
transcription of a voice note. Write a concise business report in the language of the \
transcription with these sections: Summary, Key ideas, Action items, Risks, Next steps. \
Use short bullet points and do not invent facts that are not in the transcription.";

/// Capability interface over an external AI provider.
///
/// Each call is a single round-trip: no retries, no caching.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Upload the audio file at `audio` and return the recognized text.
    async fn transcribe_audio(&self, audio: &Path) -> Result<String>;

    /// Generate a business report from a transcription.
    async fn generate_business_report(&self, transcription: &str) -> Result<String>;

    /// Gateway name, used in logs.
    fn name(&self) -> &str;
}

/// Shared gateway handle.
pub type SharedGateway = Arc<dyn AiGateway>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded call to [`MockGateway::transcribe_audio`].
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone)]
pub struct TranscribeCall {
    /// Path the gateway was handed.
    pub path: PathBuf,
    /// File contents at call time (empty if the file could not be read).
    pub bytes: Vec<u8>,
}

/// Deterministic gateway for tests.
///
/// Returns a fixed transcript and report, or a fixed failure, and records
/// every call.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct MockGateway {
    transcript: std::result::Result<String, String>,
    report: std::result::Result<String, String>,
    error: fn(String) -> crate::error::AiError,
    transcribe_calls: parking_lot::Mutex<Vec<TranscribeCall>>,
    report_calls: parking_lot::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "testing"))]
impl MockGateway {
    /// Create a mock that always succeeds with the given texts.
    pub fn new(transcript: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            transcript: Ok(transcript.into()),
            report: Ok(report.into()),
            error: crate::error::AiError::Backend,
            transcribe_calls: parking_lot::Mutex::new(Vec::new()),
            report_calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails with a backend error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::failing_with(message, crate::error::AiError::Backend)
    }

    /// Create a mock whose every call fails with the error built by `error`.
    pub fn failing_with(
        message: impl Into<String>,
        error: fn(String) -> crate::error::AiError,
    ) -> Self {
        let message = message.into();
        Self {
            transcript: Err(message.clone()),
            report: Err(message),
            error,
            transcribe_calls: parking_lot::Mutex::new(Vec::new()),
            report_calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Calls made to `transcribe_audio`, in order.
    pub fn transcribe_calls(&self) -> Vec<TranscribeCall> {
        self.transcribe_calls.lock().clone()
    }

    /// Transcriptions passed to `generate_business_report`, in order.
    pub fn report_calls(&self) -> Vec<String> {
        self.report_calls.lock().clone()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl AiGateway for MockGateway {
    async fn transcribe_audio(&self, audio: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio).await.unwrap_or_default();
        self.transcribe_calls.lock().push(TranscribeCall {
            path: audio.to_path_buf(),
            bytes,
        });
        self.transcript.clone().map_err(self.error)
    }

    async fn generate_business_report(&self, transcription: &str) -> Result<String> {
        self.report_calls.lock().push(transcription.to_string());
        self.report.clone().map_err(self.error)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
