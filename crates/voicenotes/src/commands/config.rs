//! Config command - configuration inspection.

use anyhow::Result;
use clap::{Args, Subcommand};

use voicenotes_config::VoiceNotesConfig;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective merged configuration as TOML (default)
    Show,

    /// Show which config files are checked and their precedence
    Which,

    /// Show the user config file path
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(ctx),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    print!("{}", render_effective(&ctx.loaded.config)?);
    Ok(())
}

fn cmd_which(ctx: &Context) -> Result<()> {
    println!("Config file search order (later overrides earlier):\n");
    for source in &ctx.loaded.sources {
        let status = if source.loaded { "✓" } else { "·" };
        println!("  {} {}", status, source.path.display());
    }
    Ok(())
}

fn cmd_path() -> Result<()> {
    match voicenotes_config::user_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("No user config directory available on this platform"),
    }
    Ok(())
}

/// Every section filled in, API key masked.
fn render_effective(config: &VoiceNotesConfig) -> Result<String> {
    let mut ai = config.ai();
    if ai.api_key.is_some() {
        ai.api_key = Some("********".to_string());
    }

    let effective = VoiceNotesConfig {
        server: Some(config.server()),
        ai: Some(ai),
        logging: Some(config.logging()),
    };
    Ok(effective.to_toml()?)
}
