//! Configuration system for the VoiceNotes server.
//!
//! TOML configuration with three sections (`[server]`, `[ai]`, `[logging]`),
//! layered from the user config directory and a project-local file, with the
//! provider API key optionally supplied by the environment.

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, load_config, load_config_file, load_config_with_options,
    user_config_dir, user_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
