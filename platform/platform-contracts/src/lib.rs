//! # Platform Contracts
//!
//! Subject names and payload types exchanged between the producer and the
//! consumer. Payload types are versioned by module name (`*_v1`); a new
//! payload shape gets a new module and a new dispatch registration, never an
//! in-place edit of an existing one.
//!
//! IMPORTANT: Serialized field names are part of the wire contract. Rename the
//! Rust field if needed, never the `#[serde(rename)]` value.

pub mod price_created_v1;
pub mod status_report_v1;
pub mod subjects;

pub use price_created_v1::PriceCreatedV1;
pub use status_report_v1::{HealthStatus, StatusReportV1};
pub use subjects::{MonitoredComponent, PRICE_CREATED, STATUS_FAMILY};
