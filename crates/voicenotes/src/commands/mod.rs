//! CLI command handlers.

pub mod config;
pub mod serve;

use std::path::Path;

use anyhow::{Context as _, Result};

use voicenotes_config::{ConfigSource, LoadedConfig};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged configuration with the sources it came from.
    pub loaded: LoadedConfig,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Load configuration from an explicit file, or by discovery.
///
/// The environment is applied last so `OPENAI_API_KEY` fills a missing key.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let mut loaded = match explicit {
        Some(path) => {
            let config = voicenotes_config::load_config_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            LoadedConfig {
                config,
                sources: vec![ConfigSource {
                    path: path.to_path_buf(),
                    loaded: true,
                }],
                warnings: Vec::new(),
            }
        }
        None => voicenotes_config::load_config(None).context("Failed to discover config")?,
    };

    loaded.config.apply_env();
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[server]\nport = 6123\n").unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.config.server().port, 6123);
        assert_eq!(loaded.loaded_from(), vec![path.as_path()]);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
