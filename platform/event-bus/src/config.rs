//! Bus selection from environment variables

use crate::{BusResult, EventBus, InMemoryBus, NatsBus};
use std::env;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusType {
    Nats,
    InMemory,
}

impl BusType {
    fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "nats" => Ok(BusType::Nats),
            "inmemory" => Ok(BusType::InMemory),
            other => Err(format!(
                "Invalid BUS_TYPE: {}. Must be 'nats' or 'inmemory'",
                other
            )),
        }
    }
}

/// Which transport to use and where to find it
#[derive(Debug, Clone)]
pub struct BusConfig {
    pub bus_type: BusType,
    pub nats_url: Option<String>,
}

impl BusConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse from an arbitrary key lookup
    ///
    /// `BUS_TYPE` defaults to `nats`. The NATS endpoint comes from `NATS_URL`,
    /// falling back to `NATS_URI`; it is mandatory for the NATS bus.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bus_type = match lookup("BUS_TYPE") {
            Some(value) => BusType::parse(&value)?,
            None => BusType::Nats,
        };

        let nats_url = match bus_type {
            BusType::Nats => Some(
                ["NATS_URL", "NATS_URI"]
                    .into_iter()
                    .filter_map(|key| lookup(key))
                    .find(|url| !url.trim().is_empty())
                    .ok_or_else(|| "NATS_URL must be set when BUS_TYPE=nats".to_string())?,
            ),
            BusType::InMemory => None,
        };

        Ok(Self { bus_type, nats_url })
    }

    /// Build the configured bus
    ///
    /// A NATS connection failure is returned as `BusError::ConnectionError`;
    /// callers treat it as fatal, there is no reconnect loop here.
    pub async fn connect(&self) -> BusResult<Arc<dyn EventBus>> {
        match (&self.bus_type, &self.nats_url) {
            (BusType::Nats, Some(url)) => {
                tracing::info!("Connecting to NATS at {}", url);
                let bus = NatsBus::connect(url).await?;
                tracing::info!("Successfully connected to NATS");
                Ok(Arc::new(bus))
            }
            (BusType::Nats, None) => Err(crate::BusError::ConnectionError(
                "no NATS endpoint configured".to_string(),
            )),
            (BusType::InMemory, _) => {
                tracing::info!("Using in-memory event bus");
                Ok(Arc::new(InMemoryBus::new()))
            }
        }
    }
}
