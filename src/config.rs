//! Client configuration and its sources.
//!
//! A [`ClientConfig`] is either supplied directly or produced by an async factory
//! that receives injected dependencies (typically a [`ConfigService`]). Either
//! way it is resolved exactly once per bootstrap, before the client is built.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use serenity::all::GatewayIntents;

use crate::command::CommandPrefix;
use crate::error::config::ConfigError;

/// Key holding the bot token.
pub const TOKEN_KEY: &str = "TOKEN";
/// Key holding the optional command prefix.
pub const COMMAND_PREFIX_KEY: &str = "COMMAND_PREFIX";

/// Configuration used to construct the Discord client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway intent names, e.g. `GUILDS` or `GUILD_MESSAGES`.
    pub intents: Vec<String>,
    /// Bot token used to log in.
    pub token: String,
    /// Prefix marking a message as a command, if any.
    pub command_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a config with the given intents and token and no command prefix.
    pub fn new<I, S>(intents: I, token: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            intents: intents.into_iter().map(Into::into).collect(),
            token: token.into(),
            command_prefix: None,
        }
    }

    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = Some(prefix.into());
        self
    }

    /// Reads `TOKEN` and `COMMAND_PREFIX` from a config service.
    ///
    /// Values from the service's loaded file take precedence over the process
    /// environment. `COMMAND_PREFIX` is optional.
    ///
    /// # Arguments
    /// - `config` - Config service to read keys from
    /// - `intents` - Gateway intent names to request
    ///
    /// # Returns
    /// - `Ok(ClientConfig)` - Config with token and optional prefix set
    /// - `Err(ConfigError::MissingEnvVar)` - `TOKEN` is not defined anywhere
    pub fn from_config_service<I, S>(config: &ConfigService, intents: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let token = config.require(TOKEN_KEY)?;
        let mut client_config = Self::new(intents, token);
        client_config.command_prefix = config.get(COMMAND_PREFIX_KEY);

        Ok(client_config)
    }

    /// Parses the configured intent names into serenity gateway intents.
    ///
    /// An empty intent list yields empty intents.
    pub fn gateway_intents(&self) -> Result<GatewayIntents, ConfigError> {
        let mut intents = GatewayIntents::empty();
        for name in &self.intents {
            intents |= parse_intent(name)?;
        }

        Ok(intents)
    }

    /// Returns the command prefix, treating an empty prefix as unset.
    pub fn command_prefix(&self) -> Option<CommandPrefix> {
        self.command_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
            .map(CommandPrefix::new)
    }

    /// Checks the token and intents before the client is constructed.
    ///
    /// # Returns
    /// - `Ok(GatewayIntents)` - Parsed intents ready for the client builder
    /// - `Err(ConfigError::MissingToken)` - Token is empty or whitespace
    /// - `Err(ConfigError::UnknownIntent)` - An intent name is not recognized
    pub fn validate(&self) -> Result<GatewayIntents, ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        self.gateway_intents()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("intents", &self.intents)
            .field("token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// Maps an upper snake case intent name onto serenity's gateway intent flag.
pub fn parse_intent(name: &str) -> Result<GatewayIntents, ConfigError> {
    let intent = match name {
        "GUILDS" => GatewayIntents::GUILDS,
        "GUILD_MEMBERS" => GatewayIntents::GUILD_MEMBERS,
        "GUILD_MODERATION" | "GUILD_BANS" => GatewayIntents::GUILD_MODERATION,
        "GUILD_EMOJIS_AND_STICKERS" => GatewayIntents::GUILD_EMOJIS_AND_STICKERS,
        "GUILD_INTEGRATIONS" => GatewayIntents::GUILD_INTEGRATIONS,
        "GUILD_WEBHOOKS" => GatewayIntents::GUILD_WEBHOOKS,
        "GUILD_INVITES" => GatewayIntents::GUILD_INVITES,
        "GUILD_VOICE_STATES" => GatewayIntents::GUILD_VOICE_STATES,
        "GUILD_PRESENCES" => GatewayIntents::GUILD_PRESENCES,
        "GUILD_MESSAGES" => GatewayIntents::GUILD_MESSAGES,
        "GUILD_MESSAGE_REACTIONS" => GatewayIntents::GUILD_MESSAGE_REACTIONS,
        "GUILD_MESSAGE_TYPING" => GatewayIntents::GUILD_MESSAGE_TYPING,
        "DIRECT_MESSAGES" => GatewayIntents::DIRECT_MESSAGES,
        "DIRECT_MESSAGE_REACTIONS" => GatewayIntents::DIRECT_MESSAGE_REACTIONS,
        "DIRECT_MESSAGE_TYPING" => GatewayIntents::DIRECT_MESSAGE_TYPING,
        "MESSAGE_CONTENT" => GatewayIntents::MESSAGE_CONTENT,
        "GUILD_SCHEDULED_EVENTS" => GatewayIntents::GUILD_SCHEDULED_EVENTS,
        other => return Err(ConfigError::UnknownIntent(other.to_string())),
    };

    Ok(intent)
}

/// Key/value configuration loaded from an env file with environment fallback.
///
/// Loading a file does not modify the process environment, so several services
/// can coexist in one process (e.g. in tests).
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    values: HashMap<String, String>,
}

impl ConfigService {
    /// Creates a service with no file values; lookups fall through to the
    /// process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads key/value pairs from an env file.
    ///
    /// # Arguments
    /// - `path` - Path of the `.env` style file to read
    ///
    /// # Returns
    /// - `Ok(ConfigService)` - Service holding every pair from the file
    /// - `Err(ConfigError::EnvFile)` - File missing or malformed
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            values.insert(key, value);
        }

        tracing::debug!(
            "Loaded {} config values from {}",
            values.len(),
            path.as_ref().display()
        );

        Ok(Self { values })
    }

    /// Sets a value, overriding anything loaded from file.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Looks up a key in the loaded values, then in the process environment.
    ///
    /// An empty loaded value (`TOKEN=`) counts as unset and falls through to the
    /// environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    /// Like [`get`](Self::get) but fails when the key is not set anywhere.
    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }
}

/// Future returned by a configuration factory.
pub type ConfigFuture = Pin<Box<dyn Future<Output = Result<ClientConfig, ConfigError>> + Send>>;

/// Where the client configuration comes from.
pub enum ConfigFactory {
    /// A config supplied up front.
    Literal(ClientConfig),
    /// An async factory with its dependencies already captured.
    Factory(Box<dyn FnOnce() -> ConfigFuture + Send>),
}

impl ConfigFactory {
    /// Wraps an async factory together with the dependencies injected into it.
    ///
    /// The factory is not called here; it runs once when [`resolve`](Self::resolve)
    /// is awaited during bootstrap.
    pub fn from_factory<D, F, Fut>(inject: D, use_factory: F) -> Self
    where
        D: Send + 'static,
        F: FnOnce(D) -> Fut + Send + 'static,
        Fut: Future<Output = Result<ClientConfig, ConfigError>> + Send + 'static,
    {
        ConfigFactory::Factory(Box::new(move || Box::pin(use_factory(inject))))
    }

    /// Produces the client configuration, consuming the source.
    pub async fn resolve(self) -> Result<ClientConfig, ConfigError> {
        match self {
            ConfigFactory::Literal(config) => Ok(config),
            ConfigFactory::Factory(factory) => factory().await,
        }
    }
}

impl From<ClientConfig> for ConfigFactory {
    fn from(config: ClientConfig) -> Self {
        ConfigFactory::Literal(config)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn empty_intents_parse_to_empty_flags() {
        let config = ClientConfig::new(Vec::<String>::new(), "token");
        assert_eq!(config.gateway_intents().unwrap(), GatewayIntents::empty());
    }

    #[test]
    fn intents_are_combined() {
        let config = ClientConfig::new(["GUILDS", "GUILD_MESSAGES"], "token");
        assert_eq!(
            config.gateway_intents().unwrap(),
            GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES
        );
    }

    #[test]
    fn unknown_intent_is_rejected() {
        let config = ClientConfig::new(["GUILDS", "GUILD_MESAGES"], "token");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIntent(name) if name == "GUILD_MESAGES"));
    }

    #[test]
    fn blank_token_is_rejected() {
        let config = ClientConfig::new(["GUILDS"], "   ");
        assert!(matches!(config.validate(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn empty_prefix_counts_as_unset() {
        let config = ClientConfig::new(["GUILDS"], "token").with_command_prefix("");
        assert!(config.command_prefix().is_none());

        let config = ClientConfig::new(["GUILDS"], "token").with_command_prefix("!");
        assert_eq!(config.command_prefix().unwrap().as_str(), "!");
    }

    #[test]
    fn debug_output_hides_token() {
        let config = ClientConfig::new(["GUILDS"], "super-secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn service_values_take_precedence_over_environment() {
        // PATH is always set in the process environment
        let service = ConfigService::new().with_value("PATH", "from-service");
        assert_eq!(service.get("PATH").as_deref(), Some("from-service"));

        let service = ConfigService::new();
        assert_eq!(service.get("PATH"), std::env::var("PATH").ok());
    }

    #[test]
    fn empty_service_value_falls_back_to_environment() {
        let service = ConfigService::new().with_value("PATH", "");
        assert_eq!(service.get("PATH"), std::env::var("PATH").ok());

        let service = ConfigService::new().with_value("DISCORD_MODULE_UNSET_KEY", "");
        assert_eq!(service.get("DISCORD_MODULE_UNSET_KEY"), None);
        assert!(matches!(
            service.require("DISCORD_MODULE_UNSET_KEY"),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn from_config_service_reads_token_and_prefix() {
        let service = ConfigService::new()
            .with_value(TOKEN_KEY, "abc")
            .with_value(COMMAND_PREFIX_KEY, "!");

        let config = ClientConfig::from_config_service(&service, ["GUILDS"]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.command_prefix.as_deref(), Some("!"));
        assert_eq!(config.intents, vec!["GUILDS".to_string()]);
    }

    #[test]
    fn missing_key_is_reported() {
        let service = ConfigService::new();
        let err = service
            .require("DISCORD_MODULE_SURELY_UNSET_KEY")
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnvVar(key) if key == "DISCORD_MODULE_SURELY_UNSET_KEY")
        );
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let result = ConfigService::from_env_file("./definitely/not/here.env");
        assert!(matches!(result, Err(ConfigError::EnvFile(_))));
    }

    #[test]
    fn loads_values_from_env_file() {
        let path = std::env::temp_dir().join(format!(
            "discord-module-config-{}.env",
            std::process::id()
        ));
        std::fs::write(&path, "TOKEN=file-token\nCOMMAND_PREFIX=?\n").unwrap();

        let service = ConfigService::from_env_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(service.get(TOKEN_KEY).as_deref(), Some("file-token"));
        assert_eq!(service.get(COMMAND_PREFIX_KEY).as_deref(), Some("?"));
    }

    #[tokio::test]
    async fn literal_config_resolves_as_is() {
        let config = ClientConfig::new(["GUILDS"], "abc");
        let resolved = ConfigFactory::from(config.clone()).resolve().await.unwrap();
        assert_eq!(resolved, config);
    }

    #[tokio::test]
    async fn factory_receives_injected_dependencies_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = ConfigService::new().with_value(TOKEN_KEY, "injected");

        let factory = ConfigFactory::from_factory(
            (service, calls.clone()),
            |(service, calls): (ConfigService, Arc<AtomicUsize>)| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ClientConfig::from_config_service(&service, Vec::<String>::new())
            },
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let config = factory.resolve().await.unwrap();
        assert_eq!(config.token, "injected");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn factory_errors_propagate() {
        let factory = ConfigFactory::from_factory((), |_| async {
            Err(ConfigError::MissingEnvVar(TOKEN_KEY.to_string()))
        });

        assert!(matches!(
            factory.resolve().await,
            Err(ConfigError::MissingEnvVar(_))
        ));
    }
}
