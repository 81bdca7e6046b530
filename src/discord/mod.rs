//! Discord client wrapper module.
//!
//! Provides the gateway client, the event handler that registers and
//! dispatches slash commands, and the shutdown handle.

mod client;
mod handler;

pub use client::{DiscordBot, DiscordError};
pub use handler::Handler;
