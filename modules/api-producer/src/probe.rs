use platform_contracts::{HealthStatus, MonitoredComponent};

/// Source of health values for the components behind the producer
pub trait StatusProbe: Send + Sync {
    fn check(&self, component: MonitoredComponent) -> HealthStatus;
}

/// Fixed health values taken from configuration
///
/// There is no real database or cache behind this service, so their health is
/// simulated. The api component is always healthy: if it answers, it is up.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe {
    pub db: HealthStatus,
    pub cache: HealthStatus,
}

impl StaticProbe {
    pub fn new(db: HealthStatus, cache: HealthStatus) -> Self {
        Self { db, cache }
    }
}

impl Default for StaticProbe {
    fn default() -> Self {
        Self::new(HealthStatus::Healthy, HealthStatus::Down)
    }
}

impl StatusProbe for StaticProbe {
    fn check(&self, component: MonitoredComponent) -> HealthStatus {
        match component {
            MonitoredComponent::Api => HealthStatus::Healthy,
            MonitoredComponent::Db => self.db,
            MonitoredComponent::Cache => self.cache,
        }
    }
}
