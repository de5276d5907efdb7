mod bot;
mod config;
mod handlers;
mod transport;
mod utils;

use anyhow::Result;
use config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().inspect_err(|e| error!("Invalid configuration: {}", e))?;

    info!("Starting Telegram bot...");
    info!("Web app URL: {}", config.web_app_url);

    bot::start_bot(config).await?;

    Ok(())
}
