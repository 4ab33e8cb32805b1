//! Change events pushed to subscribers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::GameSnapshot;

/// A snapshot promoted for broadcast because it differs meaningfully from
/// the last one that was broadcast.
///
/// Serialized as `{"type":"game_update","generation":..,"timestamp":..,"data":{..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "game_update")]
pub struct ChangeEvent {
    /// Generation of the wrapped snapshot.
    pub generation: u64,
    /// When the change detector let this snapshot through.
    #[serde(rename = "timestamp")]
    pub emitted_at: DateTime<Utc>,
    /// The snapshot itself, shared with the snapshot store.
    #[serde(rename = "data")]
    pub snapshot: Arc<GameSnapshot>,
}

impl ChangeEvent {
    /// Wrap a published snapshot, stamping it with the current time.
    pub fn new(snapshot: Arc<GameSnapshot>) -> Self {
        Self {
            generation: snapshot.generation,
            emitted_at: Utc::now(),
            snapshot,
        }
    }
}
