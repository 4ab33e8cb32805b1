//! The mirrored game state.
//!
//! A [`GameSnapshot`] is one complete reconstruction of the remote
//! process's observed state. It is always structurally complete: every
//! field holds either a value read this cycle or the value carried over
//! from the previous snapshot. Snapshots are immutable once published and
//! are shared by reference between the store, the change detector, and
//! the broadcast hub.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One complete, generation-stamped reconstruction of the remote state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Monotonically increasing cycle number that produced this snapshot.
    /// Generation 0 is the empty bootstrap snapshot.
    pub generation: u64,
    /// When the read cycle that produced this snapshot finished.
    pub captured_at: DateTime<Utc>,
    /// The decoded domain content.
    #[serde(flatten)]
    pub state: GameState,
}

impl GameSnapshot {
    /// The empty snapshot the engine starts from before the first cycle.
    pub fn bootstrap() -> Self {
        Self::default()
    }
}

/// Decoded domain content of a snapshot.
///
/// Kept separate from the generation stamp so that content equality can
/// be checked without the bookkeeping fields getting in the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// Trainer name decoded from the game's character set.
    pub player_name: String,
    /// Trainer ID number.
    pub player_id: u16,
    /// Money on hand.
    pub money: u32,
    /// Number of party members reported by the game (clamped).
    pub team_count: u8,
    /// Raw map identifier.
    pub current_map: u8,
    /// Human-readable name of `current_map`.
    pub location_name: String,
    /// Player X tile coordinate.
    pub player_x: u8,
    /// Player Y tile coordinate.
    pub player_y: u8,
    /// All gym badges with their obtained flag.
    pub badges: Vec<Badge>,
    /// Number of obtained badges (derived from `badges`).
    pub badge_count: u8,
    /// Number of species marked as seen.
    pub pokedex_seen: u16,
    /// Number of species marked as caught.
    pub pokedex_caught: u16,
    /// Play time hours.
    pub hours: u16,
    /// Play time minutes.
    pub minutes: u8,
    /// Play time seconds.
    pub seconds: u8,
    /// Number of non-empty bag entries (derived from `bag_items`).
    pub bag_item_count: u8,
    /// Bag contents in slot order.
    pub bag_items: Vec<BagItem>,
    /// Party members in slot order.
    #[serde(rename = "pokemon")]
    pub party: Vec<PartyMember>,
    /// Decoded battle mode.
    pub battle_mode: String,
    /// Decoded battle type.
    pub battle_type: String,
}

impl GameState {
    /// The first party member, if the party is not empty.
    pub fn lead_member(&self) -> Option<&PartyMember> {
        self.party.first()
    }

    /// Whether a save file appears to be loaded (the trainer has a name).
    pub fn game_loaded(&self) -> bool {
        !self.player_name.is_empty()
    }
}

/// A single party member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PartyMember {
    /// Party slot (0-based) this member was read from. Positions in
    /// `party` shift when a slot is omitted; the slot does not.
    pub slot: u8,
    /// Internal species index.
    pub species: u8,
    /// Species name (placeholder for unknown indices).
    pub name: String,
    /// National dex number (0 when unknown).
    pub pokedex_number: u8,
    /// Current level.
    pub level: u8,
    /// Current hit points. The most volatile party field.
    pub current_hp: u16,
    /// Maximum hit points.
    pub max_hp: u16,
    /// Attack stat.
    pub attack: u16,
    /// Defense stat.
    pub defense: u16,
    /// Speed stat.
    pub speed: u16,
    /// Special stat.
    pub special: u16,
    /// Raw status condition byte.
    pub status: u8,
    /// Decoded status condition.
    pub status_name: String,
    /// Primary type code.
    pub type1: u8,
    /// Primary type name.
    pub type1_name: String,
    /// Secondary type code.
    pub type2: u8,
    /// Secondary type name.
    pub type2_name: String,
    /// Known moves (empty slots omitted).
    pub moves: Vec<MoveSlot>,
    /// Experience points.
    pub exp_points: u32,
    /// `current_hp / max_hp` as a percentage, derived.
    pub hp_percent: f64,
}

/// A move known by a party member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MoveSlot {
    /// Move index.
    pub id: u8,
    /// Move name (placeholder for unknown indices).
    pub name: String,
}

/// One bag entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BagItem {
    /// Bag slot (0-based) this entry was read from. Empty slots are not
    /// listed, so this can differ from the position in `bag_items`.
    pub slot: u8,
    /// Item index.
    pub id: u8,
    /// Item name (placeholder for unknown indices).
    pub name: String,
    /// Quantity held.
    pub quantity: u8,
}

/// A gym badge and whether it has been obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Badge {
    /// Badge name.
    pub name: String,
    /// Whether the badge bit is set.
    pub obtained: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_generation_zero_and_empty() {
        let snap = GameSnapshot::bootstrap();
        assert_eq!(snap.generation, 0);
        assert!(snap.state.party.is_empty());
        assert!(!snap.state.game_loaded());
    }

    #[test]
    fn serializes_flat_with_legacy_party_key() {
        let mut snap = GameSnapshot::bootstrap();
        snap.generation = 7;
        snap.state.player_name = String::from("RED");
        snap.state.party.push(PartyMember {
            name: String::from("Pikachu"),
            ..PartyMember::default()
        });

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["generation"], 7);
        assert_eq!(json["player_name"], "RED");
        assert_eq!(json["pokemon"][0]["name"], "Pikachu");
        assert!(json.get("state").is_none());
    }

    #[test]
    fn lead_member_is_first_slot() {
        let mut state = GameState::default();
        assert!(state.lead_member().is_none());
        state.party.push(PartyMember {
            species: 0x54,
            ..PartyMember::default()
        });
        state.party.push(PartyMember {
            species: 0x99,
            ..PartyMember::default()
        });
        assert_eq!(state.lead_member().map(|m| m.species), Some(0x54));
    }
}
