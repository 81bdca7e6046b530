//! Gateway event handler.

use serenity::all::{
    Command, CommandInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, EventHandler, GuildId,
    Interaction, Ready,
};
use serenity::async_trait;
use tracing::{error, info, warn};

use crate::commands::{self, GENERIC_FAILURE};
use crate::records::RecordStore;

/// Dispatches gateway events to the slash commands.
pub struct Handler {
    /// Record store shared by every command invocation.
    store: RecordStore,

    /// When set, commands are registered to this guild instead of globally.
    guild_id: Option<GuildId>,
}

impl Handler {
    /// Creates a handler serving records from `store`.
    #[must_use]
    pub fn new(store: RecordStore, guild_id: Option<GuildId>) -> Self {
        Self { store, guild_id }
    }

    async fn dispatch(&self, ctx: &Context, command: &CommandInteraction) {
        let outcome = match command.data.name.as_str() {
            "profile" => commands::profile::run(ctx, &self.store, command).await,
            other => {
                warn!("Received unknown command: /{}", other);
                report_failure(ctx, command).await;
                return;
            }
        };

        if let Err(e) = outcome {
            error!("Command /{} failed: {:#}", command.data.name, e);
            report_failure(ctx, command).await;
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);

        let registered = match self.guild_id {
            Some(guild_id) => {
                info!("Registering slash commands in guild {}", guild_id);
                guild_id
                    .set_commands(&ctx.http, commands::registrations())
                    .await
            }
            None => {
                info!("Registering slash commands globally");
                Command::set_global_commands(&ctx.http, commands::registrations()).await
            }
        };

        match registered {
            Ok(registered) => info!("Registered {} slash command(s)", registered.len()),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.dispatch(&ctx, &command).await;
        }
    }
}

/// Sends the generic failure reply for a command.
///
/// Tries an initial response first and falls back to a followup when the
/// interaction was already acknowledged.
async fn report_failure(ctx: &Context, command: &CommandInteraction) {
    let response = CreateInteractionResponseMessage::new()
        .content(GENERIC_FAILURE)
        .ephemeral(true);

    if command
        .create_response(&ctx.http, CreateInteractionResponse::Message(response))
        .await
        .is_ok()
    {
        return;
    }

    let followup = CreateInteractionResponseFollowup::new()
        .content(GENERIC_FAILURE)
        .ephemeral(true);

    if let Err(e) = command.create_followup(&ctx.http, followup).await {
        warn!("Failed to deliver the failure reply: {}", e);
    }
}
