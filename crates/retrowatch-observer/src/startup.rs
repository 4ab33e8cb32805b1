//! Observer startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which binds the Observer HTTP + `WebSocket`
//! server and runs it on a background Tokio task alongside the poll
//! driver.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::server::{self, ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// A running Observer server.
#[derive(Debug)]
pub struct ObserverHandle {
    /// Address the listener actually bound, which differs from the
    /// configured one when port 0 was requested.
    pub local_addr: SocketAddr,
    /// The serving task. Completes after a graceful shutdown.
    pub task: JoinHandle<()>,
}

/// Bind the Observer server and serve it on a background task.
///
/// The bind happens before this returns, so a taken port is reported to
/// the caller instead of being logged from inside the task. The server
/// stops gracefully once `shutdown` flips to `true` or its sender is
/// dropped.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address is invalid or cannot
/// be bound.
pub async fn spawn_observer(
    config: &ServerConfig,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<ObserverHandle, StartupError> {
    let listener = server::bind(config).await?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("listener has no address: {e}")))?;

    let signal = async move {
        // Err means the sender is gone, which is also a stop.
        let _ = shutdown.wait_for(|stop| *stop).await;
    };

    let task = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, state, signal).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(%local_addr, "Observer server spawned on background task");

    Ok(ObserverHandle { local_addr, task })
}
