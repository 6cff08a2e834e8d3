// src/health/mod.rs
mod checker;
mod probe;
mod report;
mod service;

pub use checker::{CheckOutcome, HealthChecker, Messages};
pub use probe::HttpProbeChecker;
pub use report::{HealthCheckItem, HealthCheckResponse, HealthStatus};
pub use service::HealthService;
