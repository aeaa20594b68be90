//! Server lifecycle

use crate::config::ServiceConfig;
use crate::routes;
use crate::state::AppState;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{info, warn};

/// Build state, bind, and serve until SIGINT/SIGTERM
pub async fn run_server(
    config: ServiceConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;

    info!("Initializing application state...");
    let state = AppState::new(config, metrics_handle)?;
    info!(
        "Benchmark dispatcher: {} ({:?})",
        state.runner.dispatcher_name(),
        state.runner.strategy()
    );

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
