//! Envelope publisher
//!
//! Wraps a payload in an [`EventEnvelope`], resolves its subject and hands the
//! encoded bytes to the bus. Publishing is best-effort notification: exactly
//! one transport call per invocation, no retry, and a failure is reported to
//! the caller without undoing anything the caller already did.

use crate::subjects::{IdentityRouter, SubjectRouter};
use crate::{BusError, EventBus, EventEnvelope};
use serde::Serialize;
use std::sync::Arc;

/// Errors returned by [`Publisher`]
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The payload or envelope could not be serialized; no publish was attempted
    #[error("failed to serialize event: {0}")]
    Serialization(String),

    /// The transport rejected or could not deliver the publish call
    #[error("failed to publish to {subject}: {source}")]
    Transport {
        subject: String,
        #[source]
        source: BusError,
    },
}

/// Builds envelopes and publishes them on the bus
#[derive(Clone)]
pub struct Publisher {
    bus: Arc<dyn EventBus>,
    router: Arc<dyn SubjectRouter>,
}

impl Publisher {
    /// Create a publisher that uses the event type as subject
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self::with_router(bus, Arc::new(IdentityRouter))
    }

    /// Create a publisher with a custom subject router
    pub fn with_router(bus: Arc<dyn EventBus>, router: Arc<dyn SubjectRouter>) -> Self {
        Self { bus, router }
    }

    /// Publish raw payload bytes under `event_type`
    ///
    /// The bytes must be a JSON document; they are nested as the envelope
    /// payload. Returns the envelope that was sent.
    pub async fn publish(
        &self,
        event_type: &str,
        payload: Vec<u8>,
    ) -> Result<EventEnvelope, PublishError> {
        let payload: serde_json::Value = serde_json::from_slice(&payload)
            .map_err(|e| PublishError::Serialization(format!("payload is not valid JSON: {}", e)))?;

        self.send(EventEnvelope::new(event_type, payload)).await
    }

    /// Serialize a typed domain event and publish it under `event_type`
    ///
    /// A serialization failure is reported before any transport call.
    pub async fn publish_event<T: Serialize>(
        &self,
        event_type: &str,
        event: &T,
    ) -> Result<EventEnvelope, PublishError> {
        let payload = serde_json::to_value(event)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        self.send(EventEnvelope::new(event_type, payload)).await
    }

    async fn send(&self, envelope: EventEnvelope) -> Result<EventEnvelope, PublishError> {
        let bytes = envelope
            .encode()
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        let subject = self.router.subject_for_type(&envelope.event_type);

        match self.bus.publish(&subject, bytes).await {
            Ok(()) => {
                tracing::info!(
                    event_id = %envelope.id,
                    subject = %subject,
                    version = envelope.version,
                    "Published event"
                );
                Ok(envelope)
            }
            Err(e) => {
                tracing::error!(
                    event_id = %envelope.id,
                    subject = %subject,
                    error = %e,
                    "Failed to publish event"
                );
                Err(PublishError::Transport { subject, source: e })
            }
        }
    }
}
