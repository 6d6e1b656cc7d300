//! Bus subjects used by the pricing pipeline
//!
//! Status reports share one subject family (one member per monitored
//! component); the price creation event has its own dedicated subject.

use event_bus::SubjectFamily;
use std::fmt;

/// Dedicated subject (and event type) for price creation
pub const PRICE_CREATED: &str = "price.created";

/// Family covering every component status subject
pub const STATUS_FAMILY: SubjectFamily = SubjectFamily::new("ping.*.status");

/// Sub-components that report health on the status family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitoredComponent {
    /// The producer service itself
    Api,
    Db,
    Cache,
}

impl MonitoredComponent {
    pub const ALL: [MonitoredComponent; 3] = [
        MonitoredComponent::Api,
        MonitoredComponent::Db,
        MonitoredComponent::Cache,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MonitoredComponent::Api => "api",
            MonitoredComponent::Db => "db",
            MonitoredComponent::Cache => "cache",
        }
    }

    /// Status subject (and event type) for this component
    pub fn subject(&self) -> String {
        STATUS_FAMILY.member(self.as_str())
    }

    /// Resolve the component a status subject belongs to
    pub fn from_subject(subject: &str) -> Option<Self> {
        let segment = STATUS_FAMILY.segment_of(subject)?;
        Self::ALL.into_iter().find(|c| c.as_str() == segment)
    }
}

impl fmt::Display for MonitoredComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
