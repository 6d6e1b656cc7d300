//! Consumer-side dispatch state machine
//!
//! Every received message walks the same path and stops at exactly one
//! terminal state:
//!
//! ```text
//! RECEIVED -> DECODE_ENVELOPE -> { DECODE_FAILED
//!                                | ROUTE_BY_TYPE -> { UNKNOWN_TYPE
//!                                                    | DECODE_PAYLOAD -> { PAYLOAD_DECODE_FAILED
//!                                                                        | APPLY -> { HANDLER_ERROR
//!                                                                                   | APPLIED } } } }
//! ```
//!
//! There are no retries and no dead-letter queue: failures are logged and the
//! message is dropped. Each message is handled independently.

use event_bus::{BusMessage, DecodeError, EventEnvelope, IdentityRouter, SubjectRouter};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::dedup::{DedupPolicy, SeenEvents};
use crate::handler::{ErasedHandler, EventHandler, HandlerContext, HandlerError, Typed};
use crate::projection::ProjectionStore;

/// Per-message failure; terminal for that message
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to decode envelope: {0}")]
    Decode(#[from] DecodeError),

    #[error("unknown event type: {0}")]
    UnknownType(String),

    #[error("failed to decode {event_type} v{version} payload: {reason}")]
    PayloadDecode {
        event_type: String,
        version: u32,
        reason: String,
    },

    #[error("handler for {event_type} failed: {source}")]
    Handler {
        event_type: String,
        #[source]
        source: HandlerError,
    },
}

/// Successful end of the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied { event_id: Uuid, event_type: String },
    /// Skipped by the dedup policy; the handler was not invoked
    Duplicate { event_id: Uuid },
}

/// Terminal state reached by one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    Duplicate,
    DecodeFailed,
    UnknownType,
    PayloadDecodeFailed,
    HandlerFailed,
}

impl DispatchError {
    pub fn disposition(&self) -> Disposition {
        match self {
            DispatchError::Decode(_) => Disposition::DecodeFailed,
            DispatchError::UnknownType(_) => Disposition::UnknownType,
            DispatchError::PayloadDecode { .. } => Disposition::PayloadDecodeFailed,
            DispatchError::Handler { .. } => Disposition::HandlerFailed,
        }
    }
}

impl DispatchOutcome {
    pub fn disposition(&self) -> Disposition {
        match self {
            DispatchOutcome::Applied { .. } => Disposition::Applied,
            DispatchOutcome::Duplicate { .. } => Disposition::Duplicate,
        }
    }
}

/// Routes decoded envelopes to handlers by `(type, version)`
///
/// Handlers are registered while the dispatcher is still owned; once it is
/// shared behind an `Arc` the table is closed.
///
/// # Example
/// ```rust,ignore
/// let dispatcher = Dispatcher::new(store)
///     .register("price.created", 1, PriceCreatedHandler::new())
///     .with_dedup(DedupPolicy::Disabled);
/// let dispatcher = Arc::new(dispatcher);
/// ```
pub struct Dispatcher {
    table: HashMap<String, BTreeMap<u32, Box<dyn ErasedHandler>>>,
    store: Arc<dyn ProjectionStore>,
    router: Arc<dyn SubjectRouter>,
    seen: Option<SeenEvents>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ProjectionStore>) -> Self {
        Self {
            table: HashMap::new(),
            store,
            router: Arc::new(IdentityRouter),
            seen: None,
        }
    }

    /// Use a custom subject router for the delivery-subject consistency check
    pub fn with_router(mut self, router: Arc<dyn SubjectRouter>) -> Self {
        self.router = router;
        self
    }

    pub fn with_dedup(mut self, policy: DedupPolicy) -> Self {
        self.seen = SeenEvents::from_policy(policy);
        self
    }

    /// Register the handler for one `(type, version)` pair
    ///
    /// Registering the same pair twice replaces the earlier handler.
    pub fn register<H: EventHandler>(
        mut self,
        event_type: impl Into<String>,
        version: u32,
        handler: H,
    ) -> Self {
        self.table
            .entry(event_type.into())
            .or_default()
            .insert(version, Box::new(Typed(handler)));
        self
    }

    /// Whether any version of `event_type` is registered
    pub fn handles(&self, event_type: &str) -> bool {
        self.table.contains_key(event_type)
    }

    /// Run one message through the state machine
    pub async fn dispatch(&self, msg: &BusMessage) -> Result<DispatchOutcome, DispatchError> {
        // DECODE_ENVELOPE
        let envelope = EventEnvelope::decode(&msg.payload)?;

        let expected_subject = self.router.subject_for_type(&envelope.event_type);
        if expected_subject != msg.subject {
            tracing::warn!(
                event_id = %envelope.id,
                event_type = %envelope.event_type,
                subject = %msg.subject,
                "Envelope type does not match delivery subject, dispatching on type"
            );
        }

        // ROUTE_BY_TYPE
        let versions = self
            .table
            .get(&envelope.event_type)
            .ok_or_else(|| DispatchError::UnknownType(envelope.event_type.clone()))?;

        // Unregistered versions are rejected outright, no best-effort decode
        let handler = versions
            .get(&envelope.version)
            .ok_or_else(|| DispatchError::PayloadDecode {
                event_type: envelope.event_type.clone(),
                version: envelope.version,
                reason: format!(
                    "unsupported version (supported: {})",
                    SupportedVersions(versions)
                ),
            })?;

        if let Some(seen) = &self.seen {
            if !seen.claim(envelope.id) {
                return Ok(DispatchOutcome::Duplicate {
                    event_id: envelope.id,
                });
            }
        }

        // DECODE_PAYLOAD + APPLY
        let ctx = HandlerContext {
            envelope: &envelope,
            subject: &msg.subject,
            store: self.store.as_ref(),
        };

        if let Err(e) = handler.decode_and_apply(&ctx).await {
            if let Some(seen) = &self.seen {
                seen.release(envelope.id);
            }
            return Err(e);
        }

        Ok(DispatchOutcome::Applied {
            event_id: envelope.id,
            event_type: envelope.event_type,
        })
    }

    /// Dispatch one message, log the result, and report its terminal state
    ///
    /// Never fails: errors are logged and the message is dropped.
    pub async fn process(&self, msg: &BusMessage) -> Disposition {
        let span = tracing::info_span!(
            "process_event",
            subject = %msg.subject,
            bytes = msg.payload.len()
        );

        async {
            match self.dispatch(msg).await {
                Ok(outcome) => {
                    match &outcome {
                        DispatchOutcome::Applied {
                            event_id,
                            event_type,
                        } => tracing::info!(
                            event_id = %event_id,
                            event_type = %event_type,
                            "Event applied"
                        ),
                        DispatchOutcome::Duplicate { event_id } => tracing::info!(
                            event_id = %event_id,
                            "Event already applied, skipping duplicate"
                        ),
                    }
                    outcome.disposition()
                }
                Err(e) => {
                    match &e {
                        DispatchError::UnknownType(_) => {
                            tracing::warn!(error = %e, "Dropping event with unknown type")
                        }
                        _ => tracing::error!(error = %e, "Dropping event after failed dispatch"),
                    }
                    e.disposition()
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<String> = self
            .table
            .iter()
            .flat_map(|(t, versions)| versions.keys().map(move |v| format!("{}@v{}", t, v)))
            .collect();
        routes.sort();

        f.debug_struct("Dispatcher")
            .field("routes", &routes)
            .field("dedup", &self.seen.is_some())
            .finish()
    }
}

struct SupportedVersions<'a>(&'a BTreeMap<u32, Box<dyn ErasedHandler>>);

impl fmt::Display for SupportedVersions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let versions: Vec<String> = self.0.keys().map(|v| format!("v{}", v)).collect();
        f.write_str(&versions.join(", "))
    }
}
