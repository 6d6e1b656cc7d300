use event_bus::BusConfig;
use event_consumer::DedupPolicy;
use std::env;

const DEFAULT_DEDUP_CAPACITY: usize = 10_000;

/// Consumer configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bus: BusConfig,
    pub dedup: DedupPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bus = BusConfig::from_lookup(&lookup)?;

        let dedup_enabled = match lookup("DEDUP_BY_EVENT_ID") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .map_err(|_| "DEDUP_BY_EVENT_ID must be 'true' or 'false'".to_string())?,
            None => false,
        };

        let dedup = if dedup_enabled {
            let capacity = match lookup("DEDUP_CAPACITY") {
                Some(value) => value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|c| *c > 0)
                    .ok_or_else(|| "DEDUP_CAPACITY must be a positive integer".to_string())?,
                None => DEFAULT_DEDUP_CAPACITY,
            };
            DedupPolicy::ByEventId { capacity }
        } else {
            DedupPolicy::Disabled
        };

        Ok(Config { bus, dedup })
    }
}
