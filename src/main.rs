use addresscast::{ForecastConfig, logging, web};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ForecastConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging);

    tracing::info!("addresscast {} starting", addresscast::VERSION);
    web::run(config).await
}
