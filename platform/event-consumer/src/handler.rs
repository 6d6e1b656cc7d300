//! Handler seam between the dispatcher and per-event application logic

use async_trait::async_trait;
use event_bus::EventEnvelope;
use serde::de::DeserializeOwned;

use crate::dispatcher::DispatchError;
use crate::projection::{ProjectionStore, StoreError};

/// Failure while applying a decoded event
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("projection store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Rejected(String),
}

/// Everything a handler may look at while applying one event
pub struct HandlerContext<'a> {
    /// The decoded envelope (its payload is still untyped)
    pub envelope: &'a EventEnvelope,
    /// Subject the message was delivered on
    pub subject: &'a str,
    /// Projection the handler writes to
    pub store: &'a dyn ProjectionStore,
}

/// Applies one `(type, version)` payload shape
///
/// The dispatcher decodes the envelope payload into [`EventHandler::Payload`]
/// before calling [`EventHandler::apply`], so a handler never sees bytes of
/// the wrong shape.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    type Payload: DeserializeOwned + Send + 'static;

    async fn apply(
        &self,
        ctx: &HandlerContext<'_>,
        payload: Self::Payload,
    ) -> Result<(), HandlerError>;
}

/// Type-erased handler stored in the dispatch table
#[async_trait]
pub(crate) trait ErasedHandler: Send + Sync {
    async fn decode_and_apply(&self, ctx: &HandlerContext<'_>) -> Result<(), DispatchError>;
}

pub(crate) struct Typed<H>(pub(crate) H);

#[async_trait]
impl<H: EventHandler> ErasedHandler for Typed<H> {
    async fn decode_and_apply(&self, ctx: &HandlerContext<'_>) -> Result<(), DispatchError> {
        let payload: H::Payload =
            ctx.envelope
                .decode_payload()
                .map_err(|e| DispatchError::PayloadDecode {
                    event_type: ctx.envelope.event_type.clone(),
                    version: ctx.envelope.version,
                    reason: e.to_string(),
                })?;

        self.0
            .apply(ctx, payload)
            .await
            .map_err(|source| DispatchError::Handler {
                event_type: ctx.envelope.event_type.clone(),
                source,
            })
    }
}
