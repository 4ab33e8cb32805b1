//! Change detection: decides whether a fresh snapshot is worth broadcasting.
//!
//! The detector compares a candidate against the last snapshot that was
//! *emitted*, not the last one built, so slow drifts in a significant
//! field are still reported once they add up to a difference.

use retrowatch_types::{GameSnapshot, GameState};
use serde::Deserialize;

/// How candidates are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeMode {
    /// Compare only the configured [`SignificantField`] set.
    #[default]
    SignificantFields,
    /// Deep equality over the whole game state.
    Strict,
}

/// A field whose change makes a snapshot worth broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificantField {
    /// Trainer name.
    PlayerName,
    /// Money.
    Money,
    /// Location name.
    LocationName,
    /// Number of party members.
    PartySize,
    /// Current HP of the first party member.
    LeadCurrentHp,
    /// Current HP of every party member.
    PartyHp,
    /// Levels of every party member.
    PartyLevels,
    /// Species in every party slot.
    PartySpecies,
    /// Number of badges obtained.
    BadgeCount,
    /// Bag contents (ids and quantities).
    BagItems,
    /// Map coordinates.
    Position,
    /// Battle mode.
    BattleMode,
    /// Pokedex seen and caught counts.
    Pokedex,
}

impl SignificantField {
    /// The set used when none is configured.
    pub const DEFAULT_SET: [Self; 5] = [
        Self::PlayerName,
        Self::Money,
        Self::LocationName,
        Self::PartySize,
        Self::LeadCurrentHp,
    ];

    /// Whether this field differs between two states.
    pub fn differs(self, a: &GameState, b: &GameState) -> bool {
        match self {
            Self::PlayerName => a.player_name != b.player_name,
            Self::Money => a.money != b.money,
            Self::LocationName => a.location_name != b.location_name,
            Self::PartySize => a.party.len() != b.party.len(),
            Self::LeadCurrentHp => {
                a.lead_member().map(|m| m.current_hp) != b.lead_member().map(|m| m.current_hp)
            }
            Self::PartyHp => !a
                .party
                .iter()
                .map(|m| m.current_hp)
                .eq(b.party.iter().map(|m| m.current_hp)),
            Self::PartyLevels => !a
                .party
                .iter()
                .map(|m| m.level)
                .eq(b.party.iter().map(|m| m.level)),
            Self::PartySpecies => !a
                .party
                .iter()
                .map(|m| m.species)
                .eq(b.party.iter().map(|m| m.species)),
            Self::BadgeCount => a.badge_count != b.badge_count,
            Self::BagItems => !a
                .bag_items
                .iter()
                .map(|i| (i.id, i.quantity))
                .eq(b.bag_items.iter().map(|i| (i.id, i.quantity))),
            Self::Position => (a.player_x, a.player_y) != (b.player_x, b.player_y),
            Self::BattleMode => a.battle_mode != b.battle_mode,
            Self::Pokedex => {
                (a.pokedex_seen, a.pokedex_caught) != (b.pokedex_seen, b.pokedex_caught)
            }
        }
    }
}

/// Decides which snapshots become change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDetector {
    mode: ChangeMode,
    fields: Vec<SignificantField>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new(ChangeMode::SignificantFields, SignificantField::DEFAULT_SET.to_vec())
    }
}

impl ChangeDetector {
    /// Build a detector. Duplicate fields are collapsed.
    pub fn new(mode: ChangeMode, mut fields: Vec<SignificantField>) -> Self {
        let mut seen = Vec::with_capacity(fields.len());
        fields.retain(|f| {
            if seen.contains(f) {
                false
            } else {
                seen.push(*f);
                true
            }
        });
        Self { mode, fields }
    }

    /// A detector that compares the full game state.
    pub fn strict() -> Self {
        Self::new(ChangeMode::Strict, Vec::new())
    }

    /// The comparison mode.
    pub const fn mode(&self) -> ChangeMode {
        self.mode
    }

    /// The compared fields in `SignificantFields` mode.
    pub fn fields(&self) -> &[SignificantField] {
        &self.fields
    }

    /// Whether `candidate` should be broadcast given the last emitted
    /// snapshot. Always true when nothing has been emitted yet.
    ///
    /// Generation and capture time never count as a change.
    pub fn should_emit(&self, previous: Option<&GameSnapshot>, candidate: &GameSnapshot) -> bool {
        let Some(previous) = previous else {
            return true;
        };
        match self.mode {
            ChangeMode::Strict => previous.state != candidate.state,
            ChangeMode::SignificantFields => self
                .fields
                .iter()
                .any(|field| field.differs(&previous.state, &candidate.state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use retrowatch_types::{BagItem, PartyMember};

    use super::*;

    fn member(hp: u16, level: u8) -> PartyMember {
        PartyMember {
            species: 0x99,
            name: String::from("BULBASAUR"),
            level,
            current_hp: hp,
            max_hp: 20,
            ..PartyMember::default()
        }
    }

    fn snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::bootstrap();
        snap.state.player_name = String::from("RED");
        snap.state.money = 3000;
        snap.state.location_name = String::from("Pallet Town");
        snap.state.party = vec![member(20, 5), member(18, 6)];
        snap.state.team_count = 2;
        snap
    }

    #[test]
    fn first_snapshot_always_emits() {
        let detector = ChangeDetector::default();
        assert!(detector.should_emit(None, &snapshot()));
    }

    #[test]
    fn same_snapshot_twice_emits_once() {
        let detector = ChangeDetector::default();
        let strict = ChangeDetector::strict();
        let snap = snapshot();
        assert!(detector.should_emit(None, &snap));
        assert!(!detector.should_emit(Some(&snap), &snap));
        assert!(!strict.should_emit(Some(&snap), &snap));
    }

    #[test]
    fn generation_and_timestamp_are_not_changes() {
        let detector = ChangeDetector::strict();
        let a = snapshot();
        let mut b = a.clone();
        b.generation = 99;
        b.captured_at = chrono::Utc::now() + chrono::Duration::seconds(5);
        assert!(!detector.should_emit(Some(&a), &b));
    }

    #[test]
    fn each_default_field_triggers() {
        let detector = ChangeDetector::default();
        let base = snapshot();

        let mut changed = base.clone();
        changed.state.player_name = String::from("BLUE");
        assert!(detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        changed.state.money = 3001;
        assert!(detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        changed.state.location_name = String::from("Route 1");
        assert!(detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        changed.state.party.push(member(10, 3));
        assert!(detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        if let Some(lead) = changed.state.party.first_mut() {
            lead.current_hp = 7;
        }
        assert!(detector.should_emit(Some(&base), &changed));
    }

    #[test]
    fn insignificant_changes_are_suppressed_by_default() {
        let detector = ChangeDetector::default();
        let base = snapshot();
        let mut changed = base.clone();
        changed.state.player_x = 9;
        changed.state.seconds = 42;
        if let Some(second) = changed.state.party.get_mut(1) {
            second.current_hp = 1;
        }
        assert!(!detector.should_emit(Some(&base), &changed));
        assert!(ChangeDetector::strict().should_emit(Some(&base), &changed));
    }

    #[test]
    fn configured_fields_replace_defaults() {
        let detector = ChangeDetector::new(
            ChangeMode::SignificantFields,
            vec![SignificantField::PartyHp, SignificantField::BagItems],
        );
        let base = snapshot();

        let mut changed = base.clone();
        changed.state.money = 1;
        assert!(!detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        if let Some(second) = changed.state.party.get_mut(1) {
            second.current_hp = 1;
        }
        assert!(detector.should_emit(Some(&base), &changed));

        let mut changed = base.clone();
        changed.state.bag_items.push(BagItem {
            slot: 0,
            id: 4,
            name: String::from("POKE BALL"),
            quantity: 5,
        });
        assert!(detector.should_emit(Some(&base), &changed));
    }

    #[test]
    fn duplicate_fields_collapse() {
        let detector = ChangeDetector::new(
            ChangeMode::SignificantFields,
            vec![SignificantField::Money, SignificantField::Money],
        );
        assert_eq!(detector.fields(), &[SignificantField::Money]);
    }
}
