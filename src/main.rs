//! Citizen Profile Bot - Main Entry Point
//!
//! A Discord bot that serves the `/profile` slash command, rendering
//! per-user citizen records (vehicles, police records, licenses, tickets)
//! as interactive embeds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use citizen_profile_bot::config::{BotSettings, DiscordConfig};
use citizen_profile_bot::discord::DiscordBot;
use citizen_profile_bot::records::RecordStore;

/// Discord bot for citizen profile lookups.
#[derive(Parser, Debug)]
#[command(name = "profile_bot")]
#[command(about = "Serve citizen record files as Discord profile embeds")]
#[command(version)]
struct Args {
    /// Directory holding the record files (overrides DATA_DIR).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let discord_config = DiscordConfig::from_env()
        .context("Failed to load Discord configuration from environment")?;

    let settings = BotSettings::from_env_with_defaults();
    let data_dir = args.data_dir.unwrap_or(settings.data_dir);

    info!("Serving records from: {}", data_dir.display());
    if !data_dir.is_dir() {
        warn!(
            "Record directory {} does not exist; every profile will be empty",
            data_dir.display()
        );
    }

    let store = RecordStore::new(data_dir);

    // Connect to Discord
    let mut bot = DiscordBot::connect(&discord_config, store)
        .await
        .context("Failed to build the Discord client")?;

    // Shut the gateway down on Ctrl+C
    let shard_manager = bot.shard_manager();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received Ctrl+C, shutting down...");
        shard_manager.shutdown_all().await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    bot.run().await.context("Gateway connection failed")?;

    info!("Shut down cleanly");
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
