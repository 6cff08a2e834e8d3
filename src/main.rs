// src/main.rs
use anyhow::Result;
use health_report::{
    config::{self, Config},
    health::{HealthChecker, HealthService, HttpProbeChecker},
    identity::BuildInfo,
    metrics::{start_metrics_server, MetricsRegistry},
    server::ServerBuilder,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("health_report=info".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "health.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path)?;

    let build = BuildInfo::from_build_env()
        .with_overrides(config.version.clone(), config.checksum.clone());

    let checkers = build_checkers(&config)?;
    if checkers.is_empty() {
        warn!("No probes configured; /health will always report Healthy");
    }

    let mut service = HealthService::new(checkers, &build);
    info!(
        version = %service.identity().version,
        checksum = %service.identity().checksum,
        checkers = service.checker_count(),
        "Health service ready"
    );

    if config.metrics.enabled {
        let registry = MetricsRegistry::new()?;
        service = service.with_metrics(registry.collector());

        let metrics_addr: SocketAddr = ([0, 0, 0, 0], config.metrics.port).into();
        start_metrics_server(metrics_addr, registry, config.metrics.path.clone()).await?;
    }

    ServerBuilder::new(config.listen_addr)
        .with_handler(service.into_router())
        .serve_with_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_checkers(config: &Config) -> Result<Vec<Arc<dyn HealthChecker>>> {
    config
        .probes
        .iter()
        .map(|probe| -> Result<Arc<dyn HealthChecker>> {
            info!(name = %probe.name, url = %probe.url, "Registering HTTP probe");
            let checker = HttpProbeChecker::from_config(probe)?;
            Ok(Arc::new(checker))
        })
        .collect()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
