//! Observer API server for Retrowatch.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) streaming change events as JSON, one
//!   hub subscriber per connection
//! - **REST endpoints** for the current snapshot (full data, party, player,
//!   items, badges) and engine status
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! Handlers only talk to the engine through its
//! [`EngineHandle`](retrowatch_core::engine::EngineHandle): snapshot reads
//! are lock-free loads of the current `Arc`, and `WebSocket` connections
//! register and deregister with the broadcast hub.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{ObserverHandle, StartupError, spawn_observer};
pub use state::AppState;
