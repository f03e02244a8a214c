//! Binary crate for the weather gateway server.
//!
//! Loads configuration, builds the configured provider adapter and serves
//! the HTTP API until interrupted, draining in-flight requests on shutdown.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_core::provider_from_settings;
use weather_server::{AppState, Cli, app};

/// How long in-flight requests may keep draining after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.mode.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let provider = provider_from_settings(config.provider_id, &config.provider)?;
    let state = AppState { provider: Arc::from(provider) };

    let socket_addr =
        SocketAddr::from_str(&format!("{}:{}", config.server.host, config.server.port))
            .map_err(|e| anyhow!("invalid listen address: {e}"))?;

    let listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("error binding to {socket_addr}"))?;

    info!("Weather gateway starting...");
    info!("  Listen:   http://{}", socket_addr);
    info!("  Provider: {}", config.provider_id);
    info!("  Mode:     {}", config.server.mode.as_str());
    info!("  Health:   http://{}/health", socket_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app(state))
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => res??,
        _ = shutdown_signal() => {
            info!("shutdown signal received, draining in-flight requests");
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
                Ok(res) => res??,
                Err(_) => warn!("grace period elapsed before all requests drained"),
            }
        }
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
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
