//! Remote state mirroring engine for Retrowatch.
//!
//! This crate polls a running emulator's memory over its network command
//! interface, rebuilds a typed snapshot of the game every cycle, and pushes
//! meaningful changes to live subscribers. One driver task owns the whole
//! poll, decode, detect, publish pipeline; everything else reads the
//! current snapshot or listens on the hub.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `retrowatch.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- Transport, connection, and read error types.
//! - [`transport`] -- [`MemoryTransport`] trait and the UDP
//!   [`RetroArchTransport`].
//! - [`port`] -- [`MemoryPort`]: serialized reads, adaptive timeouts,
//!   retry and reconnect backoff, health state machine.
//! - [`plan`] -- Declarative `(region, kind, setter)` read plans.
//! - [`orchestrator`] -- Folds the read plan over the previous snapshot
//!   with per-field stale fallback.
//! - [`detector`] -- Decides which snapshots become change events.
//! - [`hub`] -- Per-subscriber bounded queues with drop-on-full.
//! - [`store`] -- The atomically swapped current snapshot and counters.
//! - [`driver`] -- The timer-driven poll loop.
//! - [`engine`] -- Wiring, shutdown, and the [`EngineHandle`].
//!
//! [`MemoryTransport`]: transport::MemoryTransport
//! [`RetroArchTransport`]: transport::RetroArchTransport
//! [`MemoryPort`]: port::MemoryPort
//! [`EngineHandle`]: engine::EngineHandle

pub mod config;
pub mod detector;
pub mod driver;
pub mod engine;
pub mod error;
pub mod hub;
pub mod orchestrator;
pub mod plan;
pub mod port;
pub mod store;
pub mod transport;

pub use config::{ConfigError, EngineConfig};
pub use detector::{ChangeDetector, ChangeMode, SignificantField};
pub use driver::{CycleSummary, PollDriver};
pub use engine::{Engine, EngineHandle, LinkStatus};
pub use error::{ConnectionError, ReadError, ReadFailure, TransportError};
pub use hub::{BroadcastHub, EventReceiver, PublishReport};
pub use orchestrator::{CycleOutcome, CycleReport, Orchestrator};
pub use port::{MemoryPort, PortPolicy, RangeReader};
pub use store::SnapshotStore;
pub use transport::{MemoryTransport, Platform, RetroArchTransport};
