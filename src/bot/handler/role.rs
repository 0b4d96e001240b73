use serenity::all::{Context, Role};

use super::ListenerTable;
use crate::event::DiscordEvent;

pub async fn handle_guild_role_create(listeners: &ListenerTable, _ctx: Context, new: Role) {
    listeners.emit(DiscordEvent::RoleCreate(new)).await;
}
