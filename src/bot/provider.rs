//! Client provider owning the single Discord client of a module.
//!
//! The provider is created before any gateway so it can be handed to gateway
//! constructors, and is filled in once during bootstrap. Clones share the same
//! slot, so every gateway holding a clone sees the client once it exists.

use std::sync::{Arc, OnceLock};

use serenity::all::{Cache, Client, Http, ShardManager};

use crate::command::CommandPrefix;
use crate::error::client::ClientError;

/// Handle to the live serenity client.
///
/// Holds the shareable parts of the serenity [`Client`]; the client itself is
/// moved into the gateway task once it starts.
#[derive(Clone)]
pub struct DiscordClient {
    /// HTTP client for Discord REST calls (guilds, channels, messages).
    pub http: Arc<Http>,
    /// In-memory cache of gateway data.
    pub cache: Arc<Cache>,
    /// Shard manager driving the gateway connections.
    pub shard_manager: Arc<ShardManager>,
}

impl DiscordClient {
    pub fn from_client(client: &Client) -> Self {
        Self {
            http: client.http.clone(),
            cache: client.cache.clone(),
            shard_manager: client.shard_manager.clone(),
        }
    }
}

struct Installed<T> {
    client: Arc<T>,
    command_prefix: Option<CommandPrefix>,
}

/// Provides access to the module's client once it has been constructed.
pub struct ClientProvider<T> {
    slot: Arc<OnceLock<Installed<T>>>,
}

/// Provider of the serenity-backed [`DiscordClient`].
pub type DiscordClientProvider = ClientProvider<DiscordClient>;

impl<T> ClientProvider<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// Returns the live client.
    ///
    /// Every call after construction returns the same instance.
    ///
    /// # Returns
    /// - `Ok(Arc<T>)` - The client
    /// - `Err(ClientError::NotReady)` - The client has not been constructed yet
    pub fn get_client(&self) -> Result<Arc<T>, ClientError> {
        self.slot
            .get()
            .map(|installed| installed.client.clone())
            .ok_or(ClientError::NotReady)
    }

    /// Returns the configured command prefix, if any.
    pub fn command_prefix(&self) -> Result<Option<CommandPrefix>, ClientError> {
        self.slot
            .get()
            .map(|installed| installed.command_prefix.clone())
            .ok_or(ClientError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Stores the constructed client.
    ///
    /// # Returns
    /// - `Ok(Arc<T>)` - The stored client
    /// - `Err(ClientError::AlreadyConstructed)` - A client was stored before
    pub(crate) fn install(
        &self,
        client: T,
        command_prefix: Option<CommandPrefix>,
    ) -> Result<Arc<T>, ClientError> {
        let client = Arc::new(client);
        self.slot
            .set(Installed {
                client: client.clone(),
                command_prefix,
            })
            .map_err(|_| ClientError::AlreadyConstructed)?;

        Ok(client)
    }
}

impl<T> Default for ClientProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ClientProvider<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}
