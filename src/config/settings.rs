//! Application settings and Discord configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serenity::all::GuildId;

/// Discord API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token (obtain from <https://discord.com/developers/applications>).
    pub token: String,

    /// Guild to register the command set in. When unset, commands register
    /// globally (propagation can take up to an hour).
    pub guild_id: Option<GuildId>,
}

impl DiscordConfig {
    /// Creates a new Discord configuration.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self {
            token,
            guild_id: None,
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `DISCORD_TOKEN` to be set; `DISCORD_GUILD_ID` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISCORD_TOKEN` is missing or `DISCORD_GUILD_ID`
    /// is present but not a valid guild id.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("DISCORD_TOKEN"))?;

        let guild_id = match std::env::var("DISCORD_GUILD_ID") {
            Ok(raw) => Some(parse_guild_id(&raw)?),
            Err(_) => None,
        };

        Ok(Self { token, guild_id })
    }
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|&id| id != 0)
        .map(GuildId::new)
        .ok_or(ConfigError::InvalidGuildId)
}

/// Bot-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Directory holding the kind-specific record directories.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").map_or_else(|_| default_data_dir(), PathBuf::from),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid guild ID format (must be a positive integer)")]
    InvalidGuildId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BotSettings::default();
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_discord_config_new() {
        let config = DiscordConfig::new("token-abc".to_owned());
        assert_eq!(config.token, "token-abc");
        assert!(config.guild_id.is_none());
    }

    #[test]
    fn test_parse_guild_id_valid() {
        assert_eq!(
            parse_guild_id("123456789012345678").unwrap(),
            GuildId::new(123_456_789_012_345_678)
        );
        assert_eq!(parse_guild_id(" 42 ").unwrap(), GuildId::new(42));
    }

    #[test]
    fn test_parse_guild_id_invalid() {
        assert!(matches!(
            parse_guild_id("not-a-number"),
            Err(ConfigError::InvalidGuildId)
        ));
        assert!(matches!(parse_guild_id("0"), Err(ConfigError::InvalidGuildId)));
        assert!(matches!(parse_guild_id(""), Err(ConfigError::InvalidGuildId)));
    }
}
