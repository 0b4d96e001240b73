//! Connection lifecycle handlers.

use serenity::all::{Context, GuildId, Ready, ResumedEvent};

use super::ListenerTable;
use crate::event::DiscordEvent;

/// Handles the ready event when the bot finishes its gateway handshake.
///
/// # Arguments
/// - `listeners` - Listener table to dispatch into
/// - `_ctx` - Discord context (unused, listeners reach the client through the provider)
/// - `ready` - Ready payload with the bot user and its guilds
pub async fn handle_ready(listeners: &ListenerTable, _ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    listeners.emit(DiscordEvent::Ready(ready)).await;
}

pub async fn handle_resume(listeners: &ListenerTable, _ctx: Context, event: ResumedEvent) {
    tracing::debug!("Discord gateway session resumed");

    listeners.emit(DiscordEvent::Resume(event)).await;
}

pub async fn handle_cache_ready(listeners: &ListenerTable, _ctx: Context, guilds: Vec<GuildId>) {
    listeners.emit(DiscordEvent::CacheReady(guilds)).await;
}
