//! # Event Consumer
//!
//! Consumer-side counterpart of `event-bus`: takes raw bus messages, decodes
//! the envelope, picks a handler by `(type, version)`, decodes the payload into
//! that handler's contract type and applies it to a projection store.
//!
//! ## Pieces
//!
//! - [`Dispatcher`]: the decode → route → apply state machine
//! - [`EventHandler`]: one implementation per `(type, version)`
//! - [`ProjectionStore`]: the handlers' effect target ([`InMemoryProjectionStore`])
//! - [`DedupPolicy`]: opt-in suppression of redelivered envelope ids
//! - [`start_subscription`]: one task per subject pattern, feeding the dispatcher
//!
//! ## Delivery Semantics
//!
//! Every per-message failure is terminal for that message: it is logged and
//! dropped. Nothing is retried and nothing is dead-lettered.

mod dedup;
mod dispatcher;
mod handler;
mod projection;
mod subscription;

pub use dedup::DedupPolicy;
pub use dispatcher::{DispatchError, DispatchOutcome, Dispatcher, Disposition};
pub use handler::{EventHandler, HandlerContext, HandlerError};
pub use projection::{InMemoryProjectionStore, ProjectionStore, StoreError};
pub use subscription::start_subscription;
