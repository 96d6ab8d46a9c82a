//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 5000
//! static_dir = "static"
//!
//! [ai]
//! base_url = "https://api.openai.com/v1"
//! transcription_model = "whisper-1"
//! report_model = "gpt-4o-mini"
//!
//! [logging]
//! dir = "/var/log/voicenotes"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Environment variable consulted for the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so partial files (e.g. a project-local
/// override) can be layered with [`VoiceNotesConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceNotesConfig {
    /// HTTP server settings.
    pub server: Option<ServerSection>,

    /// AI provider settings.
    pub ai: Option<AiSection>,

    /// Log output settings.
    pub logging: Option<LoggingSection>,
}

impl VoiceNotesConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Sections replace whole; fields are not merged individually.
    pub fn merge(&mut self, other: VoiceNotesConfig) {
        if other.server.is_some() {
            self.server = other.server;
        }

        if other.ai.is_some() {
            self.ai = other.ai;
        }

        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// Fill values that may come from the environment.
    ///
    /// The API key is taken from `OPENAI_API_KEY` only when the file did not
    /// set one.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Like [`apply_env`](Self::apply_env) with an explicit variable lookup.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let ai = self.ai.get_or_insert_with(AiSection::default);
        if ai.api_key.is_none()
            && let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty())
        {
            ai.api_key = Some(key);
        }
    }

    /// Server section, or defaults when absent.
    pub fn server(&self) -> ServerSection {
        self.server.clone().unwrap_or_default()
    }

    /// AI section, or defaults when absent.
    pub fn ai(&self) -> AiSection {
        self.ai.clone().unwrap_or_default()
    }

    /// Logging section, or defaults when absent.
    pub fn logging(&self) -> LoggingSection {
        self.logging.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind.
    pub bind: String,

    /// Port to listen on.
    pub port: u16,

    /// Directory of bundled static assets for the browser page.
    pub static_dir: PathBuf,

    /// Entry document served at `/`, relative to `static_dir`.
    pub index_file: String,

    /// Maximum request body size in bytes (audio uploads included).
    pub max_body_size: usize,

    /// Log one line per request.
    pub request_logging: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: PathBuf::from("static"),
            index_file: "index.html".to_string(),
            max_body_size: 25 * 1024 * 1024,
            request_logging: true,
        }
    }
}

impl ServerSection {
    /// Resolve `bind` and `port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.bind".to_string(),
            reason: format!("'{}' is not an IP address: {}", self.bind, e),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// `[ai]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSection {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// API key. Prefer the `OPENAI_API_KEY` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Speech-to-text model.
    pub transcription_model: String,

    /// Chat model for report generation.
    pub report_model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            transcription_model: "whisper-1".to_string(),
            report_model: "gpt-4o-mini".to_string(),
            timeout_secs: 120,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Directory for the rolling JSON log. Defaults to `<config dir>/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Write the JSON log file at all.
    pub json_file: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            dir: None,
            json_file: true,
        }
    }
}
