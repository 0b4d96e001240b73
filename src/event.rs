//! Subscribable event names and typed event payloads.
//!
//! Instead of passing raw serenity callback arguments around, the serenity
//! handler packs every supported callback into a [`DiscordEvent`] so listeners
//! can pattern-match on strongly-typed data. [`EventName`] is the closed set of
//! names a handler method can be marked with.

use std::fmt;
use std::str::FromStr;

use serenity::all::{
    ChannelId, Guild, GuildChannel, GuildId, Interaction, Member, Message, MessageId, Reaction,
    Ready, ResumedEvent, Role, UnavailableGuild, User,
};

use crate::error::registry::RegistryError;

/// Name of an event a handler can be subscribed to.
///
/// Names follow the discord.js convention (`ready`, `messageCreate`, ...). The
/// legacy name `message` is accepted as an alias of `messageCreate` when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Ready,
    Resume,
    CacheReady,
    GuildCreate,
    GuildDelete,
    RoleCreate,
    GuildMemberAdd,
    GuildMemberRemove,
    ChannelCreate,
    ChannelDelete,
    MessageCreate,
    MessageDelete,
    MessageReactionAdd,
    InteractionCreate,
}

impl EventName {
    /// Every subscribable event, in declaration order.
    pub const ALL: [EventName; 14] = [
        EventName::Ready,
        EventName::Resume,
        EventName::CacheReady,
        EventName::GuildCreate,
        EventName::GuildDelete,
        EventName::RoleCreate,
        EventName::GuildMemberAdd,
        EventName::GuildMemberRemove,
        EventName::ChannelCreate,
        EventName::ChannelDelete,
        EventName::MessageCreate,
        EventName::MessageDelete,
        EventName::MessageReactionAdd,
        EventName::InteractionCreate,
    ];

    /// Canonical name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Ready => "ready",
            EventName::Resume => "resume",
            EventName::CacheReady => "cacheReady",
            EventName::GuildCreate => "guildCreate",
            EventName::GuildDelete => "guildDelete",
            EventName::RoleCreate => "roleCreate",
            EventName::GuildMemberAdd => "guildMemberAdd",
            EventName::GuildMemberRemove => "guildMemberRemove",
            EventName::ChannelCreate => "channelCreate",
            EventName::ChannelDelete => "channelDelete",
            EventName::MessageCreate => "messageCreate",
            EventName::MessageDelete => "messageDelete",
            EventName::MessageReactionAdd => "messageReactionAdd",
            EventName::InteractionCreate => "interactionCreate",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "message" {
            return Ok(EventName::MessageCreate);
        }

        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownEvent(s.to_string()))
    }
}

/// A dispatched event together with its payload.
#[derive(Debug, Clone)]
pub enum DiscordEvent {
    /// The bot finished its gateway handshake.
    Ready(Ready),

    /// A gateway session was resumed.
    Resume(ResumedEvent),

    /// The cache has received every guild sent on startup.
    CacheReady(Vec<GuildId>),

    /// A guild became available or the bot joined a new guild.
    GuildCreate { guild: Guild, is_new: Option<bool> },

    /// A guild became unavailable or the bot left it.
    GuildDelete {
        incomplete: UnavailableGuild,
        full: Option<Guild>,
    },

    /// A role was created in a guild.
    RoleCreate(Role),

    /// A member joined a guild.
    GuildMemberAdd(Member),

    /// A member left a guild.
    GuildMemberRemove {
        guild_id: GuildId,
        user: User,
        member: Option<Member>,
    },

    /// A channel was created in a guild.
    ChannelCreate(GuildChannel),

    /// A channel was deleted from a guild.
    ChannelDelete {
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    },

    /// A message was sent in a channel the bot can see.
    MessageCreate(Message),

    /// A message was deleted.
    MessageDelete {
        channel_id: ChannelId,
        message_id: MessageId,
        guild_id: Option<GuildId>,
    },

    /// A reaction was added to a message.
    MessageReactionAdd(Reaction),

    /// An interaction (slash command, button, ...) was created.
    InteractionCreate(Interaction),
}

impl DiscordEvent {
    /// Name under which listeners for this event are subscribed.
    pub fn name(&self) -> EventName {
        match self {
            DiscordEvent::Ready(_) => EventName::Ready,
            DiscordEvent::Resume(_) => EventName::Resume,
            DiscordEvent::CacheReady(_) => EventName::CacheReady,
            DiscordEvent::GuildCreate { .. } => EventName::GuildCreate,
            DiscordEvent::GuildDelete { .. } => EventName::GuildDelete,
            DiscordEvent::RoleCreate(_) => EventName::RoleCreate,
            DiscordEvent::GuildMemberAdd(_) => EventName::GuildMemberAdd,
            DiscordEvent::GuildMemberRemove { .. } => EventName::GuildMemberRemove,
            DiscordEvent::ChannelCreate(_) => EventName::ChannelCreate,
            DiscordEvent::ChannelDelete { .. } => EventName::ChannelDelete,
            DiscordEvent::MessageCreate(_) => EventName::MessageCreate,
            DiscordEvent::MessageDelete { .. } => EventName::MessageDelete,
            DiscordEvent::MessageReactionAdd(_) => EventName::MessageReactionAdd,
            DiscordEvent::InteractionCreate(_) => EventName::InteractionCreate,
        }
    }
}
