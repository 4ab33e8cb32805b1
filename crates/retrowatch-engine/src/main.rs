//! Retrowatch binary.
//!
//! Wires the memory port, poll driver and observer API together and runs
//! until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `retrowatch.yaml` (or `RETROWATCH_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Start the engine against the configured RetroArch endpoint
//! 4. Spawn the observer API server
//! 5. Wait for Ctrl-C, then stop the engine and the observer

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use retrowatch_core::config::{DEFAULT_CONFIG_FILE, EngineConfig, LoggingConfig};
use retrowatch_core::engine::Engine;
use retrowatch_core::transport::RetroArchTransport;
use retrowatch_observer::{AppState, ServerConfig};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the observer port cannot
/// be bound, or the shutdown signal cannot be installed.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so failures here are
    //    reported through the returned error.
    let config_path = config_path();
    let config = EngineConfig::load_or_default(&config_path).map_err(EngineError::from)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);

    info!(
        config = %config_path.display(),
        remote_host = config.remote.host,
        remote_port = config.remote.port,
        poll_interval_ms = config.poll.interval_ms,
        change_mode = ?config.change.mode,
        "retrowatch-engine starting"
    );

    // 3. Start the engine.
    let transport = RetroArchTransport::new(config.remote.host.clone(), config.remote.port);
    let engine = Engine::start(transport, &config).await;

    // 4. Start Observer API server.
    let server_config = ServerConfig {
        host: config.observer.host.clone(),
        port: config.observer.port,
    };
    let app_state = Arc::new(AppState::new(engine.handle()));
    let (observer_stop, observer_stop_rx) = watch::channel(false);
    let observer =
        match retrowatch_observer::spawn_observer(&server_config, app_state, observer_stop_rx).await
        {
            Ok(handle) => handle,
            Err(e) => {
                engine.shutdown().await;
                return Err(EngineError::from(e).into());
            }
        };
    info!(addr = %observer.local_addr, "Observer API server started");

    // 5. Run until interrupted.
    let signal = tokio::signal::ctrl_c()
        .await
        .map_err(|e| EngineError::Signal {
            message: format!("{e}"),
        });
    info!("shutdown requested");

    // Engine first so live WebSocket streams see the hub close.
    engine.shutdown().await;
    let _ = observer_stop.send(true);
    if let Err(e) = observer.task.await {
        warn!(error = %e, "observer task ended abnormally");
    }

    info!("retrowatch-engine stopped");
    signal?;
    Ok(())
}

/// Config file path: `RETROWATCH_CONFIG` or `retrowatch.yaml`.
fn config_path() -> PathBuf {
    std::env::var_os("RETROWATCH_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
