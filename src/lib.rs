//! Citizen Profile Bot Library
//!
//! A Discord bot that turns per-user citizen record files into interactive
//! profile embeds.
//!
//! This crate provides the core functionality for:
//! - Loading per-user record files (vehicles, police records, licenses, tickets)
//! - Connecting to Discord and registering the `/profile` slash command
//! - Rendering summary and detail embeds with a timed button window
//! - Validating record data directories offline

pub mod commands;
pub mod config;
pub mod discord;
pub mod records;
