//! Declarative event handler registration for serenity Discord bots.
//!
//! Application components implement [`marker::Gateway`] and mark their methods
//! to run once or on every occurrence of a Discord event. A
//! [`module::DiscordModule`] resolves the client configuration, builds the
//! serenity client, subscribes every marked method, and logs the bot in. Code
//! that needs the client directly asks the module's
//! [`bot::provider::DiscordClientProvider`] for it.
//!
//! ```rust,ignore
//! let module = DiscordModule::for_root_async(ConfigService::new(), |config| async move {
//!     ClientConfig::from_config_service(&config, ["GUILDS", "GUILD_MESSAGES"])
//! });
//! let gateway = Arc::new(CommandBotGateway::new(module.provider()));
//! let running = module.gateway(gateway).init().await?;
//! ```

pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod marker;
pub mod module;

pub mod prelude {
    pub use crate::bot::provider::{DiscordClient, DiscordClientProvider};
    pub use crate::command::{Command, CommandPrefix};
    pub use crate::config::{ClientConfig, ConfigService};
    pub use crate::error::AppError;
    pub use crate::event::{DiscordEvent, EventName};
    pub use crate::marker::{Gateway, ListenerOptions, Markers};
    pub use crate::module::{DiscordModule, DiscordModuleRef};
}
