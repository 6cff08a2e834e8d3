// src/health/service.rs
use super::checker::HealthChecker;
use super::report::{HealthCheckItem, HealthCheckResponse};
use crate::identity::{ProcessInfo, ServiceIdentity, SystemProcessInfo, Versioner};
use crate::metrics::HealthMetrics;
use crate::server::HealthRouter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Aggregates registered checkers into a single report.
///
/// Everything here is fixed at construction; requests only read it.
pub struct HealthService {
    checkers: Vec<Arc<dyn HealthChecker>>,
    identity: ServiceIdentity,
    process: Arc<dyn ProcessInfo>,
    metrics: Option<Arc<HealthMetrics>>,
}

impl HealthService {
    /// No checker runs until the first report is built.
    pub fn new(checkers: Vec<Arc<dyn HealthChecker>>, versioner: &dyn Versioner) -> Self {
        Self {
            checkers,
            identity: ServiceIdentity::from_versioner(versioner),
            process: Arc::new(SystemProcessInfo),
            metrics: None,
        }
    }

    pub fn with_process_info(mut self, process: Arc<dyn ProcessInfo>) -> Self {
        self.process = process;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<HealthMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn checker_count(&self) -> usize {
        self.checkers.len()
    }

    /// The `/health` route, with CORS applied.
    pub fn into_router(self) -> HealthRouter {
        HealthRouter::new(Arc::new(self))
    }

    /// Runs every checker in registration order, one at a time.
    ///
    /// A failing checker only marks its own item unhealthy; the remaining
    /// checkers still run.
    pub async fn build_report(&self) -> HealthCheckResponse {
        let start = Instant::now();
        let mut items = Vec::with_capacity(self.checkers.len());

        for checker in &self.checkers {
            let outcome = checker.check().await;
            let error = outcome
                .error
                .map(|e| format!("{:#}", e))
                .unwrap_or_default();

            let item = HealthCheckItem {
                name: checker.name().to_string(),
                status: outcome.healthy.into(),
                error,
                messages: outcome.messages,
            };

            if outcome.healthy {
                debug!(checker = %item.name, "check passed");
            } else {
                warn!(
                    checker = %item.name,
                    error = %item.error,
                    messages = ?item.messages.as_slice(),
                    "Service not healthy"
                );
            }
            items.push(item);
        }

        let report = HealthCheckResponse::new(
            self.identity.version.clone(),
            self.identity.checksum.clone(),
            self.process.hostname().unwrap_or_default(),
            self.process.active_tasks(),
            items,
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_report(&report, start.elapsed());
        }

        report
    }
}
