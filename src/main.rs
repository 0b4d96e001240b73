use std::sync::Arc;

use discord_module::prelude::*;
use tracing_subscriber::EnvFilter;

/// Replies to `<prefix>ping` with `pong`.
struct PingGateway {
    discord: DiscordClientProvider,
}

impl PingGateway {
    async fn on_ready(self: Arc<Self>, event: DiscordEvent) {
        if let DiscordEvent::Ready(ready) = event {
            tracing::info!("Serving {} guilds", ready.guilds.len());
        }
    }

    async fn on_message(self: Arc<Self>, event: DiscordEvent) {
        let DiscordEvent::MessageCreate(message) = event else {
            return;
        };
        if message.author.bot {
            return;
        }

        let Ok(Some(prefix)) = self.discord.command_prefix() else {
            return;
        };
        if !prefix.matches(&message.content, "ping") {
            return;
        }

        let client = match self.discord.get_client() {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to get Discord client: {}", e);
                return;
            }
        };

        if let Err(e) = message.channel_id.say(&client.http, "pong").await {
            tracing::error!("Failed to reply to ping: {}", e);
        }
    }
}

impl Gateway for PingGateway {
    fn markers(markers: &mut Markers<Self>) {
        markers
            .once(EventName::Ready, Self::on_ready)
            .on(EventName::MessageCreate, Self::on_message);
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let module = DiscordModule::for_root_async(ConfigService::new(), |config| async move {
        ClientConfig::from_config_service(
            &config,
            ["GUILDS", "GUILD_MESSAGES", "MESSAGE_CONTENT"],
        )
    });
    let gateway = Arc::new(PingGateway {
        discord: module.provider(),
    });

    let running = module.gateway(gateway).init().await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    running.close().await
}
