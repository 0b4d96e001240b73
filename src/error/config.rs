use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required configuration key is not set.
    ///
    /// Neither the loaded config file nor the process environment defines the
    /// key. Check the `.env` file passed to `ConfigService::from_env_file`.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The bot token resolved to an empty string.
    #[error("Discord bot token is empty")]
    MissingToken,

    /// An intent name does not match any known gateway intent.
    ///
    /// Intent names use the upper snake case form, e.g. `GUILD_MESSAGES`.
    #[error("Unknown gateway intent: {0}")]
    UnknownIntent(String),

    /// The env file could not be read or parsed.
    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
