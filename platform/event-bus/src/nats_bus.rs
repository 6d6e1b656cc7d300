//! NATS-based implementation of the EventBus trait

use crate::subjects::{validate_pattern, validate_subject};
use crate::{BusError, BusMessage, BusResult, EventBus};
use async_nats::Client;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

/// EventBus implementation using NATS core publish/subscribe
///
/// Delivery is at-least-once from the point of view of consumers and
/// unordered across subjects. It wraps an `async_nats::Client`.
///
/// # Example
/// ```rust,no_run
/// use event_bus::{EventBus, NatsBus};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let bus = NatsBus::connect("nats://localhost:4222").await?;
///
/// bus.publish("price.created", b"{}".to_vec()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NatsBus {
    client: Client,
}

impl NatsBus {
    /// Create a new NatsBus from an existing NATS client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect to a NATS server
    ///
    /// Fails with `BusError::ConnectionError` if the server cannot be reached.
    pub async fn connect(url: &str) -> BusResult<Self> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| BusError::ConnectionError(format!("{}: {}", url, e)))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl EventBus for NatsBus {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> BusResult<()> {
        validate_subject(subject)?;

        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| BusError::PublishError(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self, subject: &str) -> BusResult<BoxStream<'static, BusMessage>> {
        validate_pattern(subject)?;

        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(|e| BusError::SubscribeError(e.to_string()))?;

        let stream = subscriber.map(|nats_msg| {
            BusMessage::new(nats_msg.subject.to_string(), nats_msg.payload.to_vec())
        });

        Ok(stream.boxed())
    }
}
