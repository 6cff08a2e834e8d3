// src/health/probe.rs
use super::checker::{CheckOutcome, HealthChecker, Messages};
use crate::config::ProbeConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Probes an HTTP dependency each time a report is built.
/// Any 2xx answer within the timeout counts as healthy.
pub struct HttpProbeChecker {
    name: String,
    url: Url,
    timeout: Duration,
    client: Client,
}

impl HttpProbeChecker {
    pub fn new(name: impl Into<String>, url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: name.into(),
            url,
            timeout,
            client,
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        Self::new(config.name.clone(), config.url.clone(), config.timeout())
    }
}

#[async_trait]
impl HealthChecker for HttpProbeChecker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckOutcome {
        let start = Instant::now();
        let result = timeout(self.timeout, self.client.get(self.url.as_str()).send()).await;
        let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut messages = Messages::new();
        messages.push_pair("url", self.url.as_str());
        messages.push_pair("responseTimeMs", response_time_ms);

        let outcome = match result {
            Ok(Ok(response)) => {
                let status = response.status();
                messages.push_pair("statusCode", status.as_u16());
                if status.is_success() {
                    CheckOutcome::healthy()
                } else {
                    CheckOutcome::unhealthy(Some(anyhow!("HTTP {}", status)))
                }
            }
            Ok(Err(e)) if e.is_timeout() => {
                CheckOutcome::unhealthy(Some(anyhow!("request timed out")))
            }
            Ok(Err(e)) => CheckOutcome::unhealthy(Some(e.into())),
            Err(_) => CheckOutcome::unhealthy(Some(anyhow!("request timed out"))),
        };

        outcome.with_messages(messages)
    }
}
