//! VoiceNotes - voice memos with transcription and business reports
//!
//! Main entry point for the VoiceNotes CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;

mod commands;

use commands::{config, serve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// VoiceNotes - voice memos with transcription and business reports
#[derive(Parser)]
#[command(name = "voicenotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (replaces discovery)
    #[arg(long, global = true, env = "VOICENOTES_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the VoiceNotes server (default)
    Serve(serve::ServeArgs),

    /// Configuration inspection
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = commands::load(cli.config.as_deref())?;
    // Only the long-running server writes a log file.
    let serving = matches!(cli.command, None | Some(Commands::Serve(_)));
    let logging = loaded.config.logging();
    let _guard = init_tracing(cli.verbose, serving.then_some(&logging));

    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let ctx = commands::Context {
        loaded,
        verbose: cli.verbose,
    };

    match cli.command {
        Some(Commands::Serve(args)) => serve::run(args, &ctx).await,
        Some(Commands::Config(args)) => config::run(args, &ctx).await,
        None => serve::run(serve::ServeArgs::default(), &ctx).await,
    }
}

/// Console (human-readable, stderr) plus an optional daily-rotated JSON file.
///
/// `RUST_LOG` overrides the console filter. A log directory that cannot be
/// created disables the file layer with a warning.
fn init_tracing(
    verbose: bool,
    logging: Option<&voicenotes_config::LoggingSection>,
) -> Option<WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let default_filter = if verbose {
        "voicenotes=debug,voicenotes_server=debug,voicenotes_ai=debug,voicenotes_store=debug,tower_http=debug,info"
    } else {
        "voicenotes=info,voicenotes_server=info,voicenotes_ai=info,voicenotes_store=info,warn"
    };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let log_dir = logging.filter(|l| l.json_file).and_then(|l| {
        l.dir
            .clone()
            .or_else(|| voicenotes_config::user_config_dir().map(|d| d.join("logs")))
    });

    let appender = log_dir.map(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("voicenotes")
            .filename_suffix("log")
            .build(&dir)
            .map_err(|e| (dir, e))
    });

    match appender {
        Some(Ok(file_appender)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(console)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_filter(EnvFilter::new(
                            "voicenotes=trace,voicenotes_server=trace,voicenotes_ai=trace,voicenotes_store=trace,info",
                        )),
                )
                .init();
            Some(guard)
        }
        Some(Err((dir, e))) => {
            tracing_subscriber::registry().with(console).init();
            tracing::warn!(dir = %dir.display(), error = %e, "File logging disabled");
            None
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            None
        }
    }
}
