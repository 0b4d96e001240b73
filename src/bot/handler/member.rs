//! Guild member handlers.
//!
//! Both events require the privileged `GUILD_MEMBERS` intent; without it
//! serenity never calls these handlers.

use serenity::all::{Context, GuildId, Member, User};

use super::ListenerTable;
use crate::event::DiscordEvent;

pub async fn handle_guild_member_addition(
    listeners: &ListenerTable,
    _ctx: Context,
    new_member: Member,
) {
    listeners
        .emit(DiscordEvent::GuildMemberAdd(new_member))
        .await;
}

pub async fn handle_guild_member_removal(
    listeners: &ListenerTable,
    _ctx: Context,
    guild_id: GuildId,
    user: User,
    member_data_if_available: Option<Member>,
) {
    listeners
        .emit(DiscordEvent::GuildMemberRemove {
            guild_id,
            user,
            member: member_data_if_available,
        })
        .await;
}
