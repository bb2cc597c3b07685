//! Graceful shutdown helpers

use std::{future::Future, time::Duration};

use tokio::{signal, sync::Notify};
use tracing::{error, info, warn};

/// Wait for shutdown signals (SIGINT, SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Drive `server` to completion, giving up `timeout` after `draining` fires
///
/// Returns `None` when open connections did not close in time.
pub async fn with_shutdown_deadline<F>(
    server: F,
    draining: &Notify,
    timeout: Duration,
) -> Option<F::Output>
where
    F: Future,
{
    let deadline = async {
        draining.notified().await;
        info!("Waiting up to {:?} for connections to close...", timeout);
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        output = server => Some(output),
        () = deadline => {
            warn!(?timeout, "Connections still open at shutdown deadline, exiting");
            None
        }
    }
}
