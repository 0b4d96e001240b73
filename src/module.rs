//! Module registration and bootstrap.
//!
//! A [`DiscordModule`] describes how to configure the client and which gateways
//! carry handler markers. Calling [`DiscordModule::init`] runs the startup
//! sequence:
//!
//! 1. Resolve the configuration (the async factory runs exactly once)
//! 2. Validate the token and intents
//! 3. Subscribe every marked handler
//! 4. Construct the serenity client and hand it to the provider
//! 5. Log in, then run the gateway in a background task
//!
//! Any failure aborts startup and is returned to the caller without retrying.

use std::future::Future;
use std::sync::Arc;

use serenity::all::CurrentUser;
use tokio::task::JoinHandle;

use crate::bot::handler::ListenerTable;
use crate::bot::provider::{DiscordClient, DiscordClientProvider};
use crate::bot::start;
use crate::config::{ClientConfig, ConfigFactory};
use crate::error::{config::ConfigError, AppError};
use crate::marker::{Gateway, GatewayInstance, MarkerRegistry};

/// Composable description of the Discord integration.
pub struct DiscordModule {
    config: ConfigFactory,
    provider: DiscordClientProvider,
    gateways: Vec<Box<dyn GatewayInstance>>,
}

impl DiscordModule {
    /// Creates a module from a config supplied up front.
    pub fn for_root(config: ClientConfig) -> Self {
        Self::with_config(ConfigFactory::Literal(config))
    }

    /// Creates a module whose config is produced by an async factory.
    ///
    /// `inject` is handed to `use_factory` when the module is initialized, and
    /// the factory runs exactly once, before the client is constructed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let module = DiscordModule::for_root_async(
    ///     ConfigService::from_env_file("./test/.test.env")?,
    ///     |config: ConfigService| async move {
    ///         ClientConfig::from_config_service(&config, ["GUILDS", "GUILD_MESSAGES"])
    ///     },
    /// );
    /// ```
    pub fn for_root_async<D, F, Fut>(inject: D, use_factory: F) -> Self
    where
        D: Send + 'static,
        F: FnOnce(D) -> Fut + Send + 'static,
        Fut: Future<Output = Result<ClientConfig, ConfigError>> + Send + 'static,
    {
        Self::with_config(ConfigFactory::from_factory(inject, use_factory))
    }

    fn with_config(config: ConfigFactory) -> Self {
        Self {
            config,
            provider: DiscordClientProvider::new(),
            gateways: Vec::new(),
        }
    }

    /// Client provider of this module, to be handed to gateway constructors.
    pub fn provider(&self) -> DiscordClientProvider {
        self.provider.clone()
    }

    /// Registers a gateway whose markers are bound on startup.
    pub fn gateway<C: Gateway>(mut self, gateway: Arc<C>) -> Self {
        self.gateways.push(Box::new(gateway));
        self
    }

    /// Runs the startup sequence and connects the bot.
    ///
    /// # Returns
    /// - `Ok(DiscordModuleRef)` - Bot logged in with every handler subscribed
    /// - `Err(AppError::ConfigErr)` - Config could not be resolved or is invalid
    /// - `Err(AppError::RegistryErr)` - A gateway declared a duplicate marker
    /// - `Err(AppError::DiscordErr)` - Client construction or login failed
    pub async fn init(self) -> Result<DiscordModuleRef, AppError> {
        let config = self.config.resolve().await?;
        let intents = config.validate()?;

        let listeners = Arc::new(ListenerTable::new());
        let registry = start::bind_gateways(&self.gateways, &listeners).await?;

        let (client, handle) = start::init_bot(&config.token, intents, listeners.clone()).await?;
        self.provider.install(handle.clone(), config.command_prefix())?;

        let user = start::login(&handle).await?;
        let task = tokio::spawn(start::start_bot(client));

        Ok(DiscordModuleRef {
            provider: self.provider,
            listeners,
            registry,
            client: handle,
            user,
            task,
        })
    }
}

/// A running Discord module.
pub struct DiscordModuleRef {
    provider: DiscordClientProvider,
    listeners: Arc<ListenerTable>,
    registry: MarkerRegistry,
    client: DiscordClient,
    user: CurrentUser,
    task: JoinHandle<Result<(), AppError>>,
}

impl DiscordModuleRef {
    pub fn provider(&self) -> DiscordClientProvider {
        self.provider.clone()
    }

    /// Descriptors of every subscribed handler.
    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn listeners(&self) -> &Arc<ListenerTable> {
        &self.listeners
    }

    /// The bot user the module logged in as.
    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Disconnects the bot and removes every listener.
    ///
    /// # Returns
    /// - `Ok(())` - Gateway task finished cleanly
    /// - `Err(AppError)` - Gateway task failed or panicked
    pub async fn close(self) -> Result<(), AppError> {
        tracing::info!("Shutting down Discord bot");

        self.client.shard_manager.shutdown_all().await;
        self.listeners.clear().await;

        self.task.await?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::{ConfigService, TOKEN_KEY};
    use crate::error::client::ClientError;
    use crate::error::registry::RegistryError;

    #[tokio::test]
    async fn blank_token_aborts_startup() {
        let module = DiscordModule::for_root(ClientConfig::new(Vec::<String>::new(), ""));
        let provider = module.provider();

        let result = module.init().await;

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingToken))
        ));
        assert_eq!(provider.get_client().err(), Some(ClientError::NotReady));
    }

    #[tokio::test]
    async fn unknown_intent_aborts_startup() {
        let module = DiscordModule::for_root(ClientConfig::new(["GUILDZ"], "token"));

        let result = module.init().await;

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::UnknownIntent(name))) if name == "GUILDZ"
        ));
    }

    #[tokio::test]
    async fn async_factory_runs_once_during_init() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = ConfigService::new().with_value(TOKEN_KEY, " ");

        let module = DiscordModule::for_root_async(
            (service, calls.clone()),
            |(service, calls): (ConfigService, Arc<AtomicUsize>)| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ClientConfig::from_config_service(&service, Vec::<String>::new())
            },
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Blank token stops startup right after resolution, before any network call
        let result = module.init().await;

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingToken))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    struct DoubleMarkedGateway;

    impl DoubleMarkedGateway {
        async fn on_ready(self: Arc<Self>, _event: crate::event::DiscordEvent) {}
    }

    impl Gateway for DoubleMarkedGateway {
        fn markers(markers: &mut crate::marker::Markers<Self>) {
            markers
                .once(crate::event::EventName::Ready, Self::on_ready)
                .on(crate::event::EventName::Ready, Self::on_ready);
        }
    }

    #[tokio::test]
    async fn failed_binding_leaves_provider_not_ready() {
        let module = DiscordModule::for_root(ClientConfig::new(["GUILDS"], "fake.token.value"))
            .gateway(Arc::new(DoubleMarkedGateway));
        let provider = module.provider();

        let result = module.init().await;

        assert!(matches!(
            result,
            Err(AppError::RegistryErr(RegistryError::DuplicateHandler { .. }))
        ));
        assert!(!provider.is_ready());
        assert_eq!(provider.get_client().err(), Some(ClientError::NotReady));
    }

    #[tokio::test]
    async fn factory_error_aborts_startup() {
        let module = DiscordModule::for_root_async(ConfigService::new(), |_| async {
            Err(ConfigError::MissingEnvVar(TOKEN_KEY.to_string()))
        });

        let result = module.init().await;

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(key))) if key == TOKEN_KEY
        ));
    }
}
