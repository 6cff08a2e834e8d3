// src/metrics/mod.rs
mod collector;
mod server;

pub use collector::{HealthMetrics, MetricsRegistry};
pub use server::start_metrics_server;
