// src/lib.rs
pub mod config;
pub mod health;
pub mod identity;
pub mod metrics;
pub mod server;

pub use health::{CheckOutcome, HealthChecker, HealthService};
