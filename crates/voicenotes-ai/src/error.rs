//! Error types for the AI gateway.

use thiserror::Error;

/// Result type alias using the gateway error type.
pub type Result<T> = std::result::Result<T, AiError>;

/// Error type for AI gateway operations.
///
/// Every provider failure surfaces as one of these variants; the gateway never
/// substitutes empty text for a failed call.
#[derive(Debug, Error)]
pub enum AiError {
    /// Non-success status from the provider.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Network/connectivity error.
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Provider rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// The provider answered but the body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error (API key missing, etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failure (reading the audio file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AiError {
    /// Returns true if the failure came from talking to the provider rather
    /// than from local setup.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Io(_))
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AiError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            AiError::InvalidResponse(err.to_string())
        } else {
            AiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::InvalidResponse(err.to_string())
    }
}
