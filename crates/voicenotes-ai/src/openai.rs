//! OpenAI-compatible gateway implementation.
//!
//! Transcription goes to `POST {base}/audio/transcriptions` as a multipart
//! upload; reports go to `POST {base}/chat/completions`. Any service speaking
//! the same API (Groq, local whisper servers) works by changing the base URL.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};

use crate::error::{AiError, Result};
use crate::gateway::{AiGateway, BUSINESS_REPORT_PROMPT};

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Default speech-to-text model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Default chat model for reports.
pub const DEFAULT_REPORT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the OpenAI-compatible gateway.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication (optional for local services).
    pub api_key: Option<String>,

    /// Base URL for the API.
    pub base_url: String,

    /// Model used for audio transcription.
    pub transcription_model: String,

    /// Model used for report generation.
    pub report_model: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Name for this gateway instance.
    pub name: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            report_model: DEFAULT_REPORT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            name: "openai".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Create a new config for OpenAI.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Create config from the `OPENAI_API_KEY` environment variable.
    pub fn openai_from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AiError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::openai(api_key))
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the transcription model.
    pub fn with_transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    /// Set the report model.
    pub fn with_report_model(mut self, model: impl Into<String>) -> Self {
        self.report_model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the gateway name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OpenAI Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// OpenAI-compatible AI gateway.
pub struct OpenAiGateway {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Add authentication headers to a request.
    fn add_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            builder.header(header::AUTHORIZATION, format!("Bearer {}", api_key))
        } else {
            builder
        }
    }

    /// Read the body of a successful response, or turn a failed one into an error.
    async fn success_body(response: Response) -> Result<String> {
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }
        Ok(response.text().await?)
    }

    /// Handle an error response.
    async fn handle_error_response(response: Response) -> AiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<OpenAiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

        match status.as_u16() {
            401 | 403 => AiError::Auth(message),
            429 => AiError::RateLimit(message),
            500..=599 => AiError::Backend(format!("Server error: {}", message)),
            _ => AiError::Backend(message),
        }
    }
}

#[async_trait]
impl AiGateway for OpenAiGateway {
    async fn transcribe_audio(&self, audio: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.webm")
            .to_string();

        tracing::debug!(
            gateway = %self.config.name,
            model = %self.config.transcription_model,
            bytes = bytes.len(),
            "Sending transcription request"
        );

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("model", self.config.transcription_model.clone());

        let response = self
            .add_auth(self.client.post(self.url("audio/transcriptions")))
            .multipart(form)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: OpenAiTranscriptionResponse = serde_json::from_str(&body)?;
        Ok(parsed.text)
    }

    async fn generate_business_report(&self, transcription: &str) -> Result<String> {
        let request = OpenAiChatRequest {
            model: self.config.report_model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: BUSINESS_REPORT_PROMPT.to_string(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: transcription.to_string(),
                },
            ],
        };

        tracing::debug!(
            gateway = %self.config.name,
            model = %request.model,
            chars = transcription.chars().count(),
            "Sending report request"
        );

        let response = self
            .add_auth(self.client.post(self.url("chat/completions")))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: OpenAiChatResponse = serde_json::from_str(&body)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("response contained no choices".to_string()))
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

/// Create a shared OpenAI-compatible gateway.
pub fn create_shared_gateway(config: OpenAiConfig) -> Result<Arc<dyn AiGateway>> {
    Ok(Arc::new(OpenAiGateway::new(config)?))
}

// ─────────────────────────────────────────────────────────────────────────────
// OpenAI API Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
}

#[derive(Debug, serde::Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiTranscriptionResponse {
    text: String,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}
