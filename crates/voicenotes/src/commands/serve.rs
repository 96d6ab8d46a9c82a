//! Serve command - runs the VoiceNotes HTTP server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::{info, warn};

use voicenotes_ai::{OpenAiConfig, create_shared_gateway};
use voicenotes_config::{AiSection, ServerSection};
use voicenotes_server::{Server, ServerConfig};
use voicenotes_store::InMemoryStorage;

use super::Context;

/// Arguments for the serve command.
///
/// CLI arguments override config file values.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Directory of the browser page and its assets (overrides config)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let config = &ctx.loaded.config;

    for path in ctx.loaded.loaded_from() {
        info!(path = %path.display(), "Loaded config");
    }

    let server_config = server_config(config.server(), &args)?;
    let gateway_config = gateway_config(config.ai(), &args);

    if gateway_config.api_key.is_none() {
        warn!("No API key configured; transcription and report requests will fail upstream");
    }
    if !server_config.static_dir.is_dir() {
        warn!(
            static_dir = %server_config.static_dir.display(),
            "Static directory not found; only the API will be served"
        );
    }

    let gateway = create_shared_gateway(gateway_config).context("Failed to create AI gateway")?;
    let storage = Arc::new(InMemoryStorage::new());

    let max_body_size = server_config.max_body_size;
    let server = Server::new(storage, gateway, server_config);

    if ctx.verbose {
        info!(
            bind = %server.bind_address(),
            max_body_size,
            "Effective server settings"
        );
    }

    server.run().await.context("Server exited with an error")
}

/// Merge CLI overrides into the `[server]` section.
pub fn server_config(mut section: ServerSection, args: &ServeArgs) -> Result<ServerConfig> {
    if let Some(port) = args.port {
        section.port = port;
    }
    if let Some(ref bind) = args.bind {
        section.bind = bind.clone();
    }
    if let Some(ref dir) = args.static_dir {
        section.static_dir = dir.clone();
    }

    let addr = section.socket_addr()?;
    Ok(ServerConfig::new()
        .with_bind_address(addr)
        .with_static_dir(section.static_dir)
        .with_index_file(section.index_file)
        .with_max_body_size(section.max_body_size)
        .with_request_logging(section.request_logging))
}

/// Build the gateway config from the `[ai]` section.
pub fn gateway_config(section: AiSection, args: &ServeArgs) -> OpenAiConfig {
    OpenAiConfig::default()
        .with_api_key(section.api_key)
        .with_base_url(args.base_url.clone().unwrap_or(section.base_url))
        .with_transcription_model(section.transcription_model)
        .with_report_model(section.report_model)
        .with_timeout(Duration::from_secs(section.timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = server_config(ServerSection::default(), &ServeArgs::default()).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:5000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.max_body_size, 25 * 1024 * 1024);
    }

    #[test]
    fn test_cli_overrides_section() {
        let args = ServeArgs {
            port: Some(8080),
            bind: Some("127.0.0.1".to_string()),
            static_dir: Some(PathBuf::from("/srv/page")),
            base_url: None,
        };
        let section = ServerSection {
            port: 7000,
            request_logging: false,
            ..Default::default()
        };

        let config = server_config(section, &args).unwrap();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("/srv/page"));
        assert!(!config.request_logging);
    }

    #[test]
    fn test_bad_bind_is_error() {
        let args = ServeArgs {
            bind: Some("localhost:80".to_string()),
            ..Default::default()
        };
        assert!(server_config(ServerSection::default(), &args).is_err());
    }

    #[test]
    fn test_gateway_config_mapping() {
        let section = AiSection {
            api_key: Some("sk-test".to_string()),
            report_model: "gpt-4o".to_string(),
            timeout_secs: 30,
            ..Default::default()
        };
        let args = ServeArgs {
            base_url: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        };

        let config = gateway_config(section, &args);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.report_model, "gpt-4o");
        assert_eq!(config.transcription_model, "whisper-1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
