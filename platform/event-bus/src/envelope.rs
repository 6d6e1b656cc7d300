//! # Event Envelope
//!
//! The uniformly-shaped wrapper around every message published on the bus.
//!
//! ## Envelope Fields
//!
//! - `id`: Unique identifier, generated fresh per publish (idempotency/tracing)
//! - `type`: Logical event kind; maps 1:1 to the bus subject
//! - `version`: Schema version of `payload` for this `type` (>= 1)
//! - `timestamp`: RFC 3339 instant assigned by the publisher, not the bus
//! - `payload`: Nested JSON whose shape is determined by `(type, version)`
//!
//! ## Two-Phase Decode
//!
//! [`EventEnvelope::decode`] only checks the outer shape. The payload stays an
//! untyped JSON value until the consumer knows `(type, version)` and calls
//! [`EventEnvelope::decode_payload`] with the matching contract type. Different
//! types, and different versions of one type, have incompatible payload shapes.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Version stamped on every envelope built by this crate.
///
/// The write path has no versioning logic: producers always emit the latest
/// payload shape.
pub const CURRENT_VERSION: u32 = 1;

/// Standard event envelope
///
/// # Examples
///
/// ```rust
/// use event_bus::EventEnvelope;
/// use serde_json::json;
///
/// let envelope = EventEnvelope::new("ping.api.status", json!({"status": "Healthy"}));
/// let bytes = envelope.encode().unwrap();
///
/// let decoded = EventEnvelope::decode(&bytes).unwrap();
/// assert_eq!(decoded, envelope);
/// assert_eq!(decoded.version, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event identifier
    pub id: Uuid,

    /// Logical event type (doubles as the subject name)
    #[serde(rename = "type")]
    pub event_type: String,

    /// Payload schema version for this event type
    pub version: u32,

    /// When the publisher built the envelope
    pub timestamp: DateTime<Utc>,

    /// Event-specific data, decoded lazily by the consumer
    #[serde(alias = "data")]
    pub payload: Value,
}

/// Errors produced when decoding envelope bytes
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid envelope version {0}: must be >= 1")]
    InvalidVersion(u32),
}

/// Errors produced when encoding an envelope
#[derive(Debug, thiserror::Error)]
#[error("failed to encode envelope: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

impl EventEnvelope {
    /// Create a new envelope with a fresh id, the current version and `now`
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            version: CURRENT_VERSION,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Create an envelope from explicit parts (replays, fixtures, tests)
    pub fn from_parts(
        id: Uuid,
        event_type: impl Into<String>,
        version: u32,
        timestamp: DateTime<Utc>,
        payload: Value,
    ) -> Self {
        Self {
            id,
            event_type: event_type.into(),
            version,
            timestamp,
            payload,
        }
    }

    /// Serialize the envelope to its JSON wire form
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse envelope bytes
    ///
    /// Fails when the input is not a JSON object with all five fields of the
    /// right types, or when `version` is zero. The event type is not checked
    /// against any known set; unknown types are rejected later by dispatch.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let envelope: EventEnvelope = serde_json::from_slice(bytes)?;

        if envelope.version < CURRENT_VERSION {
            return Err(DecodeError::InvalidVersion(envelope.version));
        }

        Ok(envelope)
    }

    /// Decode the inner payload into the contract type for `(type, version)`
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}
