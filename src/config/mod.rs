//! Configuration module for the profile bot.
//!
//! Handles the environment-backed Discord credentials and bot settings
//! shared by the bot and validator binaries.

mod settings;

pub use settings::{BotSettings, ConfigError, DiscordConfig};
