use anyhow::Context;
use event_consumer::InMemoryProjectionStore;
use price_consumer_rs::{build_dispatcher, start_consumers, Config};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(
        bus_type = ?config.bus.bus_type,
        dedup = ?config.dedup,
        "Starting price consumer"
    );

    let bus = config
        .bus
        .connect()
        .await
        .context("Failed to connect to event bus")?;

    let store = Arc::new(InMemoryProjectionStore::new());
    let dispatcher = Arc::new(build_dispatcher(store, config.dedup));

    let handles = start_consumers(bus, dispatcher)
        .await
        .context("Failed to start consumers")?;

    tracing::info!("Price consumer running with {} subscriptions", handles.len());

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Consumer task failed");
        }
    }

    tracing::warn!("All consumer tasks stopped");
    Ok(())
}
