//! Status Report V1 Contract Types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health of one monitored component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Down,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Down => "Down",
        }
    }

    /// Parse the wire form, case-insensitively
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "healthy" => Some(HealthStatus::Healthy),
            "down" => Some(HealthStatus::Down),
            _ => None,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload published on `ping.<component>.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReportV1 {
    pub status: HealthStatus,
}

impl StatusReportV1 {
    pub const VERSION: u32 = 1;

    pub fn new(status: HealthStatus) -> Self {
        Self { status }
    }
}
