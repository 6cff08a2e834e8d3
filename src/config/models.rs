// src/config/models.rs
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Overrides the compiled-in package version.
    #[serde(default)]
    pub version: Option<String>,
    /// Overrides the compiled-in build checksum.
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub probes: Vec<ProbeConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub name: String,
    pub url: Url,
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
            path: default_metrics_path(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("probe name must not be empty")]
    EmptyProbeName,

    #[error("probe `{0}` is configured more than once")]
    DuplicateProbe(String),

    #[error("probe `{0}` has a zero timeout")]
    ZeroTimeout(String),

    #[error("metrics path `{0}` must start with '/'")]
    InvalidMetricsPath(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for probe in &self.probes {
            if probe.name.trim().is_empty() {
                return Err(ConfigError::EmptyProbeName);
            }
            if !seen.insert(probe.name.as_str()) {
                return Err(ConfigError::DuplicateProbe(probe.name.clone()));
            }
            if probe.timeout_secs == 0 {
                return Err(ConfigError::ZeroTimeout(probe.name.clone()));
            }
        }

        if self.metrics.enabled && !self.metrics.path.starts_with('/') {
            return Err(ConfigError::InvalidMetricsPath(self.metrics.path.clone()));
        }

        Ok(())
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_probe_timeout() -> u64 {
    2
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
