//! Error types for the Discord module.
//!
//! This module provides the crate's error hierarchy. `AppError` is the top-level
//! type returned from bootstrap and teardown; it wraps the domain-specific errors
//! raised while resolving configuration, registering handler markers, and
//! accessing the client, plus pass-through errors from serenity itself.
//!
//! Configuration and login errors abort startup and are never retried. Errors
//! raised by application handlers during dispatch are not represented here; they
//! stay the application's responsibility.

pub mod client;
pub mod config;
pub mod registry;

use thiserror::Error;

use crate::error::{client::ClientError, config::ConfigError, registry::RegistryError};

/// Top-level error type for the Discord module.
///
/// Aggregates every error that can surface from bootstrapping, running, or
/// closing a [`DiscordModule`](crate::module::DiscordModule). Most variants use
/// `#[from]` for automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be resolved or is invalid.
    ///
    /// Raised before the client is constructed; aborts startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A gateway declared an invalid or duplicate handler marker.
    ///
    /// Raised while binding markers; aborts startup.
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),

    /// The client provider was used out of order.
    #[error(transparent)]
    ClientErr(#[from] ClientError),

    /// Discord API or gateway error from Serenity.
    ///
    /// Boxed due to large size. Covers login failures (invalid token, network
    /// failure) which abort startup, and errors returned by the gateway task.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// The background gateway task panicked or was cancelled.
    #[error(transparent)]
    TaskErr(#[from] tokio::task::JoinError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
