use crate::config::Config;
use crate::handlers::StartHandler;
use crate::transport::{TelegramTransport, Transport, TransportError};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

pub async fn start_bot(config: Config) -> Result<()> {
    info!("Bot is starting...");

    let bot = TelegramTransport::build_bot(&config.telegram_token, config.poll_timeout_secs)
        .context("Failed to build the HTTP client")?;
    let mut transport = TelegramTransport::connect(bot, config.poll_timeout_secs)
        .await
        .context("Could not verify the bot token")?;

    match transport.username() {
        Some(name) => info!("Authorized as @{}", name),
        None => warn!("Bot account has no username, /start@mentions will not match"),
    }

    let handler = StartHandler::new(&config).with_bot_username(transport.username());

    info!("Boardify Telegram bot is running...");
    tokio::select! {
        res = run(&mut transport, &handler) => {
            res.context("Stopped receiving updates")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}

/// Polls `transport` forever. Only a receive failure the transport cannot recover from ends the loop.
pub async fn run<T: Transport>(transport: &mut T, handler: &StartHandler) -> Result<(), TransportError> {
    loop {
        let messages = match transport.receive().await {
            Ok(messages) => messages,
            Err(e) => match e.retry_delay() {
                Some(delay) => {
                    warn!("{}, polling again in {:?}", e, delay);
                    tokio::time::sleep(delay).await;
                    continue;
                }
                None => return Err(e),
            },
        };

        for msg in &messages {
            let Some(reply) = handler.handle(msg) else {
                continue;
            };

            debug!("Sending web app button to chat {}", msg.chat_id.0);
            if let Err(e) = transport.send(&reply).await {
                warn!("{}", e);
            }
        }
    }
}
