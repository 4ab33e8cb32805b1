//! Shared type definitions for the Retrowatch state mirror.
//!
//! Every crate in the workspace speaks in these types: the orchestrator
//! builds [`GameSnapshot`] values, the change detector compares them, the
//! broadcast hub fans out [`ChangeEvent`] wrappers, and the observer API
//! serializes them. Snapshot types flow to `TypeScript` via `ts-rs` for
//! the live dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers (subscriber identity)
//! - [`snapshot`] -- The mirrored game state and its nested collections
//! - [`event`] -- Change events pushed to subscribers
//! - [`status`] -- Connection health and engine status reporting

pub mod event;
pub mod ids;
pub mod snapshot;
pub mod status;

pub use event::ChangeEvent;
pub use ids::SubscriberId;
pub use snapshot::{Badge, BagItem, GameSnapshot, GameState, MoveSlot, PartyMember};
pub use status::{ConnectionHealth, EngineStatus};
