use serenity::all::{Context, Guild, UnavailableGuild};

use super::ListenerTable;
use crate::event::DiscordEvent;

pub async fn handle_guild_create(
    listeners: &ListenerTable,
    _ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    listeners
        .emit(DiscordEvent::GuildCreate { guild, is_new })
        .await;
}

/// Handles the guild_delete event.
///
/// `full` is only present when the guild was cached before it became
/// unavailable or the bot left it.
pub async fn handle_guild_delete(
    listeners: &ListenerTable,
    _ctx: Context,
    incomplete: UnavailableGuild,
    full: Option<Guild>,
) {
    listeners
        .emit(DiscordEvent::GuildDelete { incomplete, full })
        .await;
}
