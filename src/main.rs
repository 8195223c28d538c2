mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;

use prometheus::Registry;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{CouchbaseClient, MemoryBucketStore};
use application::{ExporterMetrics, FetchScheduler, Refresher};
use config::Config;
use interface::http::{create_router, AppState};
use interface::metrics::BucketStatsCollector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("couchbase_exporter={},tower_http=info", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting couchbase-exporter v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Initialize adapters
    let client = Arc::new(CouchbaseClient::new(config.couchbase())?);
    let store = Arc::new(MemoryBucketStore::new());

    // Metrics registry: bucket stats plus the exporter's own counters
    let metrics = ExporterMetrics::new()?;
    let registry = Registry::new();
    metrics.register(&registry)?;
    registry.register(Box::new(BucketStatsCollector::new(store.clone())?))?;

    let scheduler = FetchScheduler::new(
        client.clone(),
        store.clone(),
        config.concurrency(),
        config.fetch_timeout,
        metrics.clone(),
    );
    let refresher = Arc::new(
        Refresher::new(client, store.clone(), scheduler, metrics)
            .with_intervals(config.buckets_refresh_interval, config.stats_interval)
            .with_fetch_timeout(config.fetch_timeout),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let handles = refresher.start(shutdown_rx).await;
    info!("✓ Bucket refresher started ({:?})", config.concurrency());

    // Create HTTP server
    let app = create_router(AppState {
        registry,
        store,
        telemetry_path: config.telemetry_path.clone(),
    });
    let listener = tokio::net::TcpListener::bind(config.listen_address).await?;

    info!("✓ couchbase-exporter listening on {}", config.listen_address);
    info!("  → Metrics: http://{}{}", config.listen_address, config.telemetry_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(());
    handles.join().await;
    info!("Stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
