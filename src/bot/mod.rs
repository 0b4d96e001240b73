//! Discord bot integration: client construction, listener binding, and login.
//!
//! The serenity client is built with a [`handler::Handler`] backed by a
//! [`handler::ListenerTable`]. Handlers marked on application gateways are
//! subscribed to that table before the bot logs in, and the bot then runs in a
//! separate tokio task so the caller is not blocked.
//!
//! # Gateway Intents
//!
//! Intents are taken from the client configuration. Message content is only
//! delivered when `MESSAGE_CONTENT` is requested, and `GUILD_MEMBERS` as well as
//! `GUILD_PRESENCES` are privileged intents that must be enabled in the Discord
//! Developer Portal for the bot application.

pub mod handler;
pub mod provider;
pub mod start;
