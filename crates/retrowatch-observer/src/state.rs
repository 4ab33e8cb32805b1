//! Shared application state for the Observer API server.
//!
//! [`AppState`] wraps the engine's [`EngineHandle`]. Every REST read goes
//! through the handle's lock-free accessors, so the observer never blocks
//! the poll loop.

use chrono::{DateTime, Utc};
use retrowatch_core::engine::EngineHandle;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Accessors and subscription management for the running engine.
    pub engine: EngineHandle,
    /// When the observer was created, shown on the status page.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create the application state around an engine handle.
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            started_at: Utc::now(),
        }
    }
}
