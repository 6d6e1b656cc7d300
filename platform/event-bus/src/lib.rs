//! # EventBus Abstraction
//!
//! Shared messaging layer for the producer and consumer services: the event
//! envelope wire format, subject naming, publishing, and the transport seam.
//!
//! ## Implementations
//!
//! - **NatsBus**: Production implementation using NATS core pub/sub
//! - **InMemoryBus**: Test/dev implementation using in-memory channels
//!
//! ## Usage
//!
//! ```rust,no_run
//! use event_bus::{EventBus, EventEnvelope, InMemoryBus, Publisher};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bus: Arc<dyn EventBus> = Arc::new(InMemoryBus::new());
//!
//! // Subscribe to a family of subjects
//! let mut stream = bus.subscribe("ping.*.status").await?;
//!
//! // Publish an enveloped event
//! let publisher = Publisher::new(bus.clone());
//! publisher
//!     .publish_event("ping.cache.status", &serde_json::json!({"status": "Down"}))
//!     .await?;
//!
//! while let Some(msg) = futures::StreamExt::next(&mut stream).await {
//!     let envelope = EventEnvelope::decode(&msg.payload)?;
//!     println!("{} v{} on {}", envelope.event_type, envelope.version, msg.subject);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod envelope;
mod inmemory_bus;
mod nats_bus;
mod publisher;
mod subjects;

pub use config::{BusConfig, BusType};
pub use envelope::{DecodeError, EncodeError, EventEnvelope, CURRENT_VERSION};
pub use inmemory_bus::InMemoryBus;
pub use nats_bus::NatsBus;
pub use publisher::{PublishError, Publisher};
pub use subjects::{
    matches_family, validate_pattern, validate_subject, IdentityRouter, SubjectFamily,
    SubjectRouter,
};

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::fmt;

/// A raw message delivered by the event bus
///
/// `payload` carries the encoded envelope bytes exactly as published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    /// Concrete subject the message was published to
    pub subject: String,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(subject: String, payload: Vec<u8>) -> Self {
        Self { subject, payload }
    }
}

/// Errors that can occur when using the event bus
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("failed to publish message: {0}")]
    PublishError(String),

    #[error("failed to subscribe to subject: {0}")]
    SubscribeError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("invalid subject pattern: {0}")]
    InvalidSubject(String),
}

/// Result type for event bus operations
pub type BusResult<T> = Result<T, BusError>;

/// Core event bus abstraction for publish-subscribe messaging
///
/// Publishing is fire-and-forget and subscriptions are push-delivered; no
/// request/response round trip is modelled.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish a message to a concrete subject
    ///
    /// # Returns
    /// * `Ok(())` if the transport accepted the message
    /// * `Err(BusError)` if publishing failed
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> BusResult<()>;

    /// Subscribe to messages matching a subject pattern
    ///
    /// # Arguments
    /// * `subject` - The subject pattern to subscribe to (supports wildcards: `*`, `>`)
    ///   - `*` matches a single token (e.g., `ping.*.status`)
    ///   - `>` matches one or more tokens (e.g., `ping.>`)
    async fn subscribe(&self, subject: &str) -> BusResult<BoxStream<'static, BusMessage>>;
}

impl fmt::Debug for dyn EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventBus")
    }
}
