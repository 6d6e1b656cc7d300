use event_bus::BusConfig;
use platform_contracts::HealthStatus;
use std::env;

/// Producer configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub bus: BusConfig,
    /// Simulated database health reported on `ping.db.status`
    pub db_status: HealthStatus,
    /// Simulated cache health reported on `ping.cache.status`
    pub cache_status: HealthStatus,
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

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("PORT must be a valid u16: {}", e))?;

        let db_status = parse_status(&lookup, "DB_STATUS", HealthStatus::Healthy)?;
        let cache_status = parse_status(&lookup, "CACHE_STATUS", HealthStatus::Down)?;

        Ok(Config {
            host,
            port,
            bus,
            db_status,
            cache_status,
        })
    }
}

fn parse_status<F>(lookup: &F, key: &str, default: HealthStatus) -> Result<HealthStatus, String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => HealthStatus::from_str(&value)
            .ok_or_else(|| format!("Invalid {}: {}. Must be 'Healthy' or 'Down'", key, value)),
        None => Ok(default),
    }
}
