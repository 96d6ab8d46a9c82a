//! Application state shared across handlers.

use std::sync::Arc;

use voicenotes_ai::SharedGateway;
use voicenotes_store::{InMemoryStorage, Storage};

use crate::config::ServerConfig;

/// Shared, thread-safe storage handle.
pub type SharedStorage = Arc<dyn Storage>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Notes, categories and reminders.
    pub storage: SharedStorage,

    /// Transcription and report provider.
    pub gateway: SharedGateway,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: SharedStorage, gateway: SharedGateway, config: ServerConfig) -> Self {
        Self {
            storage,
            gateway,
            config: Arc::new(config),
        }
    }

    /// Create application state over a fresh in-memory store seeded with the
    /// default categories.
    pub fn in_memory(gateway: SharedGateway, config: ServerConfig) -> Self {
        Self::new(Arc::new(InMemoryStorage::new()), gateway, config)
    }
}
