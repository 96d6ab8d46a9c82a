//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default max body size for requests, audio uploads included (25 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 25 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Enable request logging.
    pub request_logging: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Directory holding the bundled browser page and its assets.
    pub static_dir: PathBuf,

    /// Entry document served at `/`, relative to `static_dir`.
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            request_logging: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            static_dir: PathBuf::from("static"),
            index_file: "index.html".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Enable or disable request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }

    /// Set the maximum request body size.
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set the static asset directory.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Set the entry document served at `/`.
    pub fn with_index_file(mut self, file: impl Into<String>) -> Self {
        self.index_file = file.into();
        self
    }

    /// Full path of the entry document.
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}
