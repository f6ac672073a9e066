//! Skill bot - main entry point.

use anyhow::Context;
use mode_explorer::{ModeExplorer, ModeExplorerClient, StubExplorer};
use secrecy::ExposeSecret;
use signal_client::{MessageReceiver, SignalClient};
use skill_bot::config::{BotConfig, Config, ExplorerBackend, ExplorerConfig, LogFormat};
use skill_bot::skills::{MemecoinHandler, ModeHandler};
use skill_bot::{AppResult, Bot, SkillRegistry};
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot);

    info!("Starting skill bot...");

    let explorer = build_explorer(&config.explorer).await?;

    let signal = SignalClient::new(
        &config.signal.service_url,
        &config.signal.phone_number,
        config.signal.timeout,
    )
    .context("Failed to create Signal client")?;

    if !signal.health_check().await {
        error!("Signal API not reachable at {}", config.signal.service_url);
        return Err(anyhow::anyhow!("Signal API not reachable").into());
    }
    info!("Signal API healthy");

    let registry = Arc::new(SkillRegistry::standard(
        Arc::new(ModeHandler::new(explorer, &config.explorer.web_url)),
        Arc::new(MemecoinHandler::new(&config.memecoin.chain)),
    ));
    info!("Registered {} skills", registry.descriptors().len());

    let bot = Arc::new(Bot::new(registry, signal.clone()));

    info!("Listening for messages...");
    let receiver = MessageReceiver::new(signal, config.signal.poll_interval);
    let mut stream = Box::pin(receiver.stream());

    // Main message loop. Each command runs on its own task.
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                let bot = bot.clone();
                tokio::spawn(async move {
                    if let Err(e) = bot.handle_message(&message).await {
                        error!("Failed to handle message from {}: {}", message.source, e);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

async fn build_explorer(config: &ExplorerConfig) -> AppResult<Arc<dyn ModeExplorer>> {
    match config.backend {
        ExplorerBackend::Live => {
            let mut client = ModeExplorerClient::new(&config.base_url, config.timeout)
                .context("Failed to create explorer client")?;
            if let Some(api_key) = &config.api_key {
                client = client.with_api_key(api_key.expose_secret().as_str());
            }

            if client.health_check().await {
                info!("Mode explorer healthy at {}", client.base_url());
            } else {
                warn!("Mode explorer health check failed - will retry on requests");
            }
            Ok(Arc::new(client))
        }
        ExplorerBackend::Stub => {
            warn!("Using stub explorer - Mode replies are fabricated");
            Ok(Arc::new(StubExplorer::new()))
        }
    }
}

fn init_logging(config: &BotConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
