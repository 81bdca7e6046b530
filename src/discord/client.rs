//! Discord client wrapper.

use std::sync::Arc;

use serenity::all::{Client, GatewayIntents, ShardManager};
use thiserror::Error;
use tracing::info;

use super::Handler;
use crate::config::DiscordConfig;
use crate::records::RecordStore;

/// Errors that can occur while running the Discord client.
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Failed to build the Discord client: {0}")]
    Build(serenity::Error),

    #[error("Gateway connection ended: {0}")]
    Gateway(serenity::Error),
}

/// High-level Discord client wrapper.
pub struct DiscordBot {
    /// The underlying serenity client.
    client: Client,
}

impl DiscordBot {
    /// Builds the gateway client with the profile handler installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed.
    pub async fn connect(config: &DiscordConfig, store: RecordStore) -> Result<Self, DiscordError> {
        info!("Building the Discord client...");

        let handler = Handler::new(store, config.guild_id);

        // Interactions are delivered regardless of gateway intents.
        let client = Client::builder(&config.token, GatewayIntents::empty())
            .event_handler(handler)
            .await
            .map_err(DiscordError::Build)?;

        Ok(Self { client })
    }

    /// Handle used to shut the gateway down from another task.
    #[must_use]
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        self.client.shard_manager.clone()
    }

    /// Runs the gateway until it disconnects or is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn run(&mut self) -> Result<(), DiscordError> {
        info!("Starting the gateway connection...");
        self.client.start().await.map_err(DiscordError::Gateway)
    }
}

impl std::fmt::Debug for DiscordBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordBot").finish_non_exhaustive()
    }
}
