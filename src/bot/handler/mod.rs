use std::sync::Arc;

use serenity::all::{
    ChannelId, Context, EventHandler, Guild, GuildChannel, GuildId, Interaction, Member, Message,
    MessageId, Reaction, Ready, ResumedEvent, Role, UnavailableGuild, User,
};
use serenity::async_trait;

pub mod channel;
pub mod guild;
pub mod listeners;
pub mod member;
pub mod message;
pub mod ready;
pub mod role;

pub use listeners::ListenerTable;

/// Discord bot event handler
///
/// Forwards each supported serenity callback into the listener table as a
/// [`DiscordEvent`](crate::event::DiscordEvent). Serenity runs every callback
/// in its own task, so listeners for different events may overlap in time.
pub struct Handler {
    pub listeners: Arc<ListenerTable>,
}

impl Handler {
    pub fn new(listeners: Arc<ListenerTable>) -> Self {
        Self { listeners }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.listeners, ctx, ready).await;
    }

    /// Called when a gateway session is resumed
    async fn resume(&self, ctx: Context, event: ResumedEvent) {
        ready::handle_resume(&self.listeners, ctx, event).await;
    }

    /// Called once the cache has received every guild from startup
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        ready::handle_cache_ready(&self.listeners, ctx, guilds).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.listeners, ctx, guild, is_new).await;
    }

    /// Called when a guild becomes unavailable or the bot leaves it
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(&self.listeners, ctx, incomplete, full).await;
    }

    /// Called when a role is created in a guild
    async fn guild_role_create(&self, ctx: Context, new: Role) {
        role::handle_guild_role_create(&self.listeners, ctx, new).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.listeners, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.listeners,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }

    /// Called when a channel is created in a guild
    async fn channel_create(&self, ctx: Context, channel: GuildChannel) {
        channel::handle_channel_create(&self.listeners, ctx, channel).await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.listeners, ctx, channel, messages).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, new_message: Message) {
        message::handle_message(&self.listeners, ctx, new_message).await;
    }

    /// Called when a message is deleted
    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        message::handle_message_delete(&self.listeners, ctx, channel_id, deleted_message_id, guild_id)
            .await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, add_reaction: Reaction) {
        message::handle_reaction_add(&self.listeners, ctx, add_reaction).await;
    }

    /// Called when an interaction is created
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        message::handle_interaction_create(&self.listeners, ctx, interaction).await;
    }
}
