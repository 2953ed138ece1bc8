//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend, spawns the background workers, and runs the
//! Axum server until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use tokio::sync::mpsc;

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::cleanup_worker::run_cleanup_worker;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::create_store;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - the mapping store (backend per `DB_TYPE`; the durable backend applies
///   migrations before it is handed out)
/// - the background click worker fed by a bounded channel
/// - the periodic expired-mapping cleanup pass (unless disabled)
/// - the Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if store construction fails (including an unsupported
/// backend selector), the listener cannot bind, or the server errors.
pub async fn run(config: Config) -> Result<()> {
    let store = create_store(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, store.clone()));
    tracing::info!("Click worker started");

    if config.cleanup_interval_secs > 0 {
        tokio::spawn(run_cleanup_worker(
            store.clone(),
            Duration::from_secs(config.cleanup_interval_secs),
        ));
        tracing::info!("Cleanup worker started");
    }

    let shortener = Arc::new(ShortenerService::new(
        store.clone(),
        click_tx,
        config.base_url.clone(),
        config.short_code_length,
    ));

    let app = app_router(AppState::new(shortener));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server exited");

    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
