//! Message, reaction and interaction handlers.
//!
//! Message content is empty unless the `MESSAGE_CONTENT` intent is requested.

use serenity::all::{ChannelId, Context, GuildId, Interaction, Message, MessageId, Reaction};

use super::ListenerTable;
use crate::event::DiscordEvent;

/// Handles the message event for every message the bot can see.
///
/// Messages sent by the bot itself are dispatched as well; listeners filter
/// them if they need to.
pub async fn handle_message(listeners: &ListenerTable, _ctx: Context, message: Message) {
    let dispatched = listeners.emit(DiscordEvent::MessageCreate(message)).await;

    tracing::trace!("Dispatched message to {} listeners", dispatched);
}

pub async fn handle_message_delete(
    listeners: &ListenerTable,
    _ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    guild_id: Option<GuildId>,
) {
    listeners
        .emit(DiscordEvent::MessageDelete {
            channel_id,
            message_id: deleted_message_id,
            guild_id,
        })
        .await;
}

pub async fn handle_reaction_add(listeners: &ListenerTable, _ctx: Context, add_reaction: Reaction) {
    listeners
        .emit(DiscordEvent::MessageReactionAdd(add_reaction))
        .await;
}

pub async fn handle_interaction_create(
    listeners: &ListenerTable,
    _ctx: Context,
    interaction: Interaction,
) {
    listeners
        .emit(DiscordEvent::InteractionCreate(interaction))
        .await;
}
