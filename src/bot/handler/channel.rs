use serenity::all::{Context, GuildChannel, Message};

use super::ListenerTable;
use crate::event::DiscordEvent;

pub async fn handle_channel_create(listeners: &ListenerTable, _ctx: Context, channel: GuildChannel) {
    listeners.emit(DiscordEvent::ChannelCreate(channel)).await;
}

pub async fn handle_channel_delete(
    listeners: &ListenerTable,
    _ctx: Context,
    channel: GuildChannel,
    messages: Option<Vec<Message>>,
) {
    listeners
        .emit(DiscordEvent::ChannelDelete { channel, messages })
        .await;
}
