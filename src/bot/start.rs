use std::sync::Arc;

use serenity::all::{Client, CurrentUser, GatewayIntents};

use crate::bot::handler::{Handler, ListenerTable};
use crate::bot::provider::DiscordClient;
use crate::error::{registry::RegistryError, AppError};
use crate::marker::{GatewayInstance, MarkerRegistry};

/// Builds the Discord client without connecting it.
///
/// # Arguments
/// - `token` - Bot token used to log in later
/// - `intents` - Gateway intents the bot requests
/// - `listeners` - Listener table the event handler dispatches into
///
/// # Returns
/// - `Ok((Client, DiscordClient))` - The client and a shareable handle to it
/// - `Err(AppError::DiscordErr)` - Serenity failed to build the client
pub async fn init_bot(
    token: &str,
    intents: GatewayIntents,
    listeners: Arc<ListenerTable>,
) -> Result<(Client, DiscordClient), AppError> {
    let client = Client::builder(token, intents)
        .event_handler(Handler::new(listeners))
        .await?;

    let handle = DiscordClient::from_client(&client);

    Ok((client, handle))
}

/// Subscribes every marked handler of the given gateways.
///
/// Gateways are processed in registration order and each gateway's handlers in
/// declaration order. Once-markers become one-shot listeners and on-markers
/// persistent ones.
///
/// # Returns
/// - `Ok(MarkerRegistry)` - Registry holding every bound descriptor
/// - `Err(RegistryError)` - A gateway marked a method twice or was registered twice
pub(crate) async fn bind_gateways(
    gateways: &[Box<dyn GatewayInstance>],
    listeners: &ListenerTable,
) -> Result<MarkerRegistry, RegistryError> {
    let mut registry = MarkerRegistry::new();

    for gateway in gateways {
        for handler in gateway.bind(&mut registry)? {
            listeners.add_handler(handler).await;
        }
    }

    tracing::info!(
        "Bound {} Discord event handlers from {} gateways",
        registry.descriptors().len(),
        gateways.len()
    );

    Ok(registry)
}

/// Logs in by fetching the bot's own user with the configured token.
///
/// A rejected token or network failure is returned as is; it is not retried.
pub async fn login(client: &DiscordClient) -> Result<CurrentUser, AppError> {
    let user = client.http.get_current_user().await?;

    tracing::info!("Logged in to Discord as {}", user.name);

    Ok(user)
}

/// Starts the Discord bot in a blocking manner
///
/// Runs the gateway connection until every shard is shut down. It should be
/// called from within a tokio::spawn task.
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    tracing::info!("Discord bot stopped");

    Ok(())
}
