//! Slash command definitions and execution.
//!
//! Each command lives in its own module with a `register()` builder and a
//! `run()` entry point; the gateway handler dispatches by command name.

pub mod profile;
mod types;

pub use types::ProfileButton;

use serenity::all::CreateCommand;

/// Ephemeral reply sent when a command fails before producing a response.
pub const GENERIC_FAILURE: &str = "An error occurred while fetching the profile.";

/// Every slash command the bot registers on startup.
#[must_use]
pub fn registrations() -> Vec<CreateCommand> {
    vec![profile::register()]
}
