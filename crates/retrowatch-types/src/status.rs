//! Connection health and engine status reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health of the link to the remote process.
///
/// The remote memory port moves through these states as an explicit
/// state machine: `Disconnected -> Connecting -> Connected`, dropping to
/// `Degraded` on the first failed read and back to `Disconnected` once the
/// consecutive-failure threshold is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ConnectionHealth {
    /// No usable link; the next read or connect performs a fresh handshake.
    Disconnected,
    /// A handshake is in progress.
    Connecting,
    /// The last read succeeded.
    Connected,
    /// Recent reads have failed but the failure threshold is not crossed.
    Degraded,
}

impl ConnectionHealth {
    /// Encode as a byte for lock-free storage.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Disconnected => 0,
            Self::Connecting => 1,
            Self::Connected => 2,
            Self::Degraded => 3,
        }
    }

    /// Decode from a byte written by [`as_u8`](Self::as_u8). Unknown
    /// values decode as `Disconnected`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Connected,
            3 => Self::Degraded,
            _ => Self::Disconnected,
        }
    }

    /// Whether reads are currently expected to reach the remote process.
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Connected | Self::Degraded)
    }
}

impl core::fmt::Display for ConnectionHealth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Degraded => "degraded",
        };
        f.write_str(label)
    }
}

/// Point-in-time engine status served by the status accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EngineStatus {
    /// Current link health.
    pub health: ConnectionHealth,
    /// Consecutive failed reads or handshakes.
    pub consecutive_failures: u32,
    /// Finish time of the last cycle in which at least one read succeeded.
    pub last_successful_cycle: Option<DateTime<Utc>>,
    /// Currently registered subscribers.
    pub subscriber_count: usize,
    /// Generation of the current snapshot.
    pub generation: u64,
    /// Read cycles completed since start.
    pub cycles_completed: u64,
    /// Change events published since start.
    pub events_published: u64,
    /// Fields carried over from the previous snapshot in the last cycle.
    pub stale_fields_last_cycle: u32,
    /// Whether the current snapshot shows a loaded save.
    pub game_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_byte_encoding_round_trips() {
        for health in [
            ConnectionHealth::Disconnected,
            ConnectionHealth::Connecting,
            ConnectionHealth::Connected,
            ConnectionHealth::Degraded,
        ] {
            assert_eq!(ConnectionHealth::from_u8(health.as_u8()), health);
        }
        assert_eq!(ConnectionHealth::from_u8(200), ConnectionHealth::Disconnected);
    }

    #[test]
    fn only_connected_and_degraded_are_usable() {
        assert!(ConnectionHealth::Connected.is_usable());
        assert!(ConnectionHealth::Degraded.is_usable());
        assert!(!ConnectionHealth::Connecting.is_usable());
        assert!(!ConnectionHealth::Disconnected.is_usable());
    }
}
