//! # API Producer
//!
//! HTTP service that turns requests into envelopes on the bus: status reports
//! for each monitored component on `GET /ping` and price creation events on
//! `POST /products`.

pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod probe;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use probe::{StaticProbe, StatusProbe};
pub use routes::{router, AppState};
