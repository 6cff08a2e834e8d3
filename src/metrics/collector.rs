// src/metrics/collector.rs
use crate::health::{HealthCheckResponse, HealthStatus};
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<HealthMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(HealthMetrics::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<HealthMetrics> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct HealthMetrics {
    pub reports_total: IntCounterVec,
    pub check_status: IntGaugeVec,
    pub report_duration_seconds: Histogram,
}

impl HealthMetrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        let reports_total = IntCounterVec::new(
            Opts::new("health_reports_total", "Health reports served, by overall status"),
            &["overall"],
        )?;
        registry.register(Box::new(reports_total.clone()))?;

        let check_status = IntGaugeVec::new(
            Opts::new(
                "health_check_status",
                "Last reported checker status (1=healthy, 0=unhealthy)",
            ),
            &["checker"],
        )?;
        registry.register(Box::new(check_status.clone()))?;

        let report_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "health_report_duration_seconds",
            "Time spent running all checkers for one report",
        ))?;
        registry.register(Box::new(report_duration_seconds.clone()))?;

        Ok(Self {
            reports_total,
            check_status,
            report_duration_seconds,
        })
    }

    pub fn record_report(&self, report: &HealthCheckResponse, duration: Duration) {
        let overall = match report.overall_health() {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        };
        self.reports_total.with_label_values(&[overall]).inc();

        for item in &report.items {
            let value = if item.status.is_healthy() { 1 } else { 0 };
            self.check_status
                .with_label_values(&[item.name.as_str()])
                .set(value);
        }

        self.report_duration_seconds.observe(duration.as_secs_f64());
    }
}
