// src/health/report.rs
use super::checker::Messages;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        self == HealthStatus::Healthy
    }
}

impl From<bool> for HealthStatus {
    fn from(healthy: bool) -> Self {
        if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

/// One checker's contribution to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckItem {
    pub name: String,
    pub status: HealthStatus,
    /// Empty when the checker gave no error.
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub messages: Messages,
}

/// The document served at `/health`.
///
/// Serialize-only: `overallHealth` is always derived from `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    overall_health: HealthStatus,
    pub version: String,
    pub checksum: String,
    pub hostname: String,
    pub active_task_count: usize,
    pub items: Vec<HealthCheckItem>,
}

impl HealthCheckResponse {
    /// Overall health is derived from `items`: unhealthy iff any item is.
    pub fn new(
        version: String,
        checksum: String,
        hostname: String,
        active_task_count: usize,
        items: Vec<HealthCheckItem>,
    ) -> Self {
        let overall_health = HealthStatus::from(items.iter().all(|i| i.status.is_healthy()));
        Self {
            overall_health,
            version,
            checksum,
            hostname,
            active_task_count,
            items,
        }
    }

    pub fn overall_health(&self) -> HealthStatus {
        self.overall_health
    }

    pub fn is_healthy(&self) -> bool {
        self.overall_health.is_healthy()
    }
}
