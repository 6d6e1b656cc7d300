//! Subscription runner: one task per subject pattern
//!
//! Messages of one subscription are processed one at a time in receipt order.
//! Separate subscriptions run as separate tasks and may be processed
//! concurrently with each other.

use event_bus::{BusResult, EventBus};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::dispatcher::Dispatcher;

/// Subscribe to `pattern` and feed every message to the dispatcher
///
/// The subscribe call itself happens before this returns, so a subscription
/// failure surfaces to the caller (fatal at startup). The spawned task runs
/// until the bus closes the stream.
pub async fn start_subscription(
    bus: Arc<dyn EventBus>,
    pattern: &str,
    dispatcher: Arc<Dispatcher>,
) -> BusResult<JoinHandle<()>> {
    let mut stream = bus.subscribe(pattern).await?;
    let pattern = pattern.to_string();

    tracing::info!("Subscribed to {}", pattern);

    Ok(tokio::spawn(async move {
        while let Some(msg) = stream.next().await {
            dispatcher.process(&msg).await;
        }

        tracing::warn!("Subscription to {} stopped", pattern);
    }))
}
