mod bot;
mod config;
mod error;
mod models;
mod notify;
mod providers;
mod store;

use config::Config;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Rental Scout - listing inquiry bot");
    info!("=====================================");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    info!("Reading configuration from {}", config_path.display());
    let config = Config::load(&config_path)?;

    let stats = bot::run(&config).await?;

    info!("");
    info!(
        "✅ Run complete: {} listings fetched, {} already contacted, {} inquiries sent, {} failed",
        stats.fetched, stats.skipped, stats.sent, stats.failed
    );

    Ok(())
}
