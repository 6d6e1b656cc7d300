use anyhow::Context;
use api_producer_rs::{router, AppState, Config, StaticProbe};
use event_bus::Publisher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting API producer service...");

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let bus = config
        .bus
        .connect()
        .await
        .context("Failed to connect to event bus")?;

    let state = AppState::new(
        Publisher::new(bus),
        Arc::new(StaticProbe::new(config.db_status, config.cache_status)),
    );
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("API producer listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server failed")?;

    Ok(())
}
