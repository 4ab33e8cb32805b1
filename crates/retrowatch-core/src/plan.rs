//! The declarative read plan.
//!
//! A plan is a list of `(region, kind, setter)` entries. The orchestrator
//! walks it in order, decodes each successful read and hands the value to
//! the setter; a failed read simply skips the setter, which leaves the
//! field as it was in the previous snapshot.
//!
//! Counts and collection identities are not in these lists: they gate
//! other reads and are handled by the orchestrator directly.

use retrowatch_schema::{DomainValue, FieldKind, MemoryLayout, RecordField, Region};
use retrowatch_types::{GameState, PartyMember};

/// Writes a decoded value into its target.
pub type Setter<T> = fn(&mut T, DomainValue);

/// One planned read of a fixed region.
#[derive(Debug, Clone)]
pub struct FieldRead<T> {
    /// Field name used in cycle reports.
    pub name: &'static str,
    /// Where to read.
    pub region: Region,
    /// How to decode.
    pub kind: FieldKind,
    /// Where the value goes.
    pub apply: Setter<T>,
}

impl<T> FieldRead<T> {
    /// Plan a read.
    pub const fn new(
        name: &'static str,
        region: Region,
        kind: FieldKind,
        apply: Setter<T>,
    ) -> Self {
        Self {
            name,
            region,
            kind,
            apply,
        }
    }
}

/// One planned read relative to a record's base address.
#[derive(Debug, Clone)]
pub struct RecordRead<T> {
    /// Field name used in cycle reports.
    pub name: &'static str,
    /// Offset and length within the record.
    pub field: RecordField,
    /// How to decode.
    pub kind: FieldKind,
    /// Where the value goes.
    pub apply: Setter<T>,
}

impl<T> RecordRead<T> {
    /// Plan a record read.
    pub const fn new(
        name: &'static str,
        field: RecordField,
        kind: FieldKind,
        apply: Setter<T>,
    ) -> Self {
        Self {
            name,
            field,
            kind,
            apply,
        }
    }
}

/// Member fields whose freshness gates `hp_percent`.
pub const HP_FIELDS: [&str; 2] = ["current_hp", "max_hp"];

fn clamp_u8(n: u32) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}

fn clamp_u16(n: u32) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

const fn scalar(
    name: &'static str,
    region: Region,
    kind: FieldKind,
    apply: Setter<GameState>,
) -> FieldRead<GameState> {
    FieldRead::new(name, region, kind, apply)
}

const fn member(
    name: &'static str,
    field: RecordField,
    kind: FieldKind,
    apply: Setter<PartyMember>,
) -> RecordRead<PartyMember> {
    RecordRead::new(name, field, kind, apply)
}

/// Top-level scalar reads, in issue order.
pub fn player_plan(layout: &MemoryLayout) -> Vec<FieldRead<GameState>> {
    vec![
        scalar("player_name", layout.player_name, FieldKind::Text, |s, v| {
            if let DomainValue::Text(name) = v {
                s.player_name = name;
            }
        }),
        scalar("player_id", layout.player_id, FieldKind::U16Le, |s, v| {
            if let Some(n) = v.as_number() {
                s.player_id = clamp_u16(n);
            }
        }),
        scalar("money", layout.money, FieldKind::Bcd, |s, v| {
            if let Some(n) = v.as_number() {
                s.money = n;
            }
        }),
        scalar("location", layout.current_map, FieldKind::Location, |s, v| {
            if let DomainValue::Code { code, name } = v {
                s.current_map = code;
                s.location_name = name;
            }
        }),
        scalar("player_x", layout.player_x, FieldKind::U8, |s, v| {
            if let Some(n) = v.as_number() {
                s.player_x = clamp_u8(n);
            }
        }),
        scalar("player_y", layout.player_y, FieldKind::U8, |s, v| {
            if let Some(n) = v.as_number() {
                s.player_y = clamp_u8(n);
            }
        }),
        scalar("badges", layout.badges, FieldKind::BadgeFlags, |s, v| {
            if let DomainValue::Badges(badges) = v {
                s.badge_count = clamp_u8(
                    u32::try_from(badges.iter().filter(|b| b.obtained).count()).unwrap_or(0),
                );
                s.badges = badges;
            }
        }),
        scalar("pokedex_seen", layout.pokedex_seen, FieldKind::BitCount, |s, v| {
            if let Some(n) = v.as_number() {
                s.pokedex_seen = clamp_u16(n);
            }
        }),
        scalar("pokedex_caught", layout.pokedex_caught, FieldKind::BitCount, |s, v| {
            if let Some(n) = v.as_number() {
                s.pokedex_caught = clamp_u16(n);
            }
        }),
        scalar("hours", layout.play_hours, FieldKind::U16Be, |s, v| {
            if let Some(n) = v.as_number() {
                s.hours = clamp_u16(n);
            }
        }),
        scalar("minutes", layout.play_minutes, FieldKind::U8, |s, v| {
            if let Some(n) = v.as_number() {
                s.minutes = clamp_u8(n);
            }
        }),
        scalar("seconds", layout.play_seconds, FieldKind::U8, |s, v| {
            if let Some(n) = v.as_number() {
                s.seconds = clamp_u8(n);
            }
        }),
        scalar("battle_mode", layout.battle_mode, FieldKind::BattleMode, |s, v| {
            if let DomainValue::Code { name, .. } = v {
                s.battle_mode = name;
            }
        }),
        scalar("battle_type", layout.battle_type, FieldKind::BattleType, |s, v| {
            if let DomainValue::Code { name, .. } = v {
                s.battle_type = name;
            }
        }),
    ]
}

/// Per-member reads issued after the species read succeeded.
pub fn member_plan(layout: &MemoryLayout) -> Vec<RecordRead<PartyMember>> {
    let record = &layout.party_record;
    vec![
        member("current_hp", record.current_hp, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.current_hp = clamp_u16(n);
            }
        }),
        member("status", record.status, FieldKind::Status, |m, v| {
            if let DomainValue::Code { code, name } = v {
                m.status = code;
                m.status_name = name;
            }
        }),
        member("type1", record.type1, FieldKind::ElementType, |m, v| {
            if let DomainValue::Code { code, name } = v {
                m.type1 = code;
                m.type1_name = name;
            }
        }),
        member("type2", record.type2, FieldKind::ElementType, |m, v| {
            if let DomainValue::Code { code, name } = v {
                m.type2 = code;
                m.type2_name = name;
            }
        }),
        member("moves", record.moves, FieldKind::MoveList, |m, v| {
            if let DomainValue::Moves(moves) = v {
                m.moves = moves;
            }
        }),
        member("exp_points", record.exp_points, FieldKind::U24Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.exp_points = n;
            }
        }),
        member("level", record.level, FieldKind::U8, |m, v| {
            if let Some(n) = v.as_number() {
                m.level = clamp_u8(n);
            }
        }),
        member("max_hp", record.max_hp, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.max_hp = clamp_u16(n);
            }
        }),
        member("attack", record.attack, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.attack = clamp_u16(n);
            }
        }),
        member("defense", record.defense, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.defense = clamp_u16(n);
            }
        }),
        member("speed", record.speed, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.speed = clamp_u16(n);
            }
        }),
        member("special", record.special, FieldKind::U16Be, |m, v| {
            if let Some(n) = v.as_number() {
                m.special = clamp_u16(n);
            }
        }),
    ]
}

/// Current HP as a percentage of max HP. Zero when max HP is zero.
pub fn hp_percent(current: u16, max: u16) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(current) / f64::from(max) * 100.0
}
