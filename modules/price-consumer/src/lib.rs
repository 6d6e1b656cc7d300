//! # Price Consumer
//!
//! Subscribes to the status family and the price creation subject, dispatches
//! each delivery to its `(type, version)` handler and keeps a projection of
//! product id → issued external ids.

pub mod config;
pub mod consumer_tasks;
pub mod external_ids;
pub mod handlers;

pub use config::Config;
pub use consumer_tasks::{build_dispatcher, start_consumers};
pub use external_ids::{ExternalIdIssuer, ExternalIdPair};
pub use handlers::{PriceCreatedHandler, StatusHandler};
