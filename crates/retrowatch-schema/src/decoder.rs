//! The schema decoder: a pure, total function from raw bytes to domain
//! values.
//!
//! The orchestrator never interprets bytes itself. Each planned read is
//! tagged with a [`FieldKind`] and the decoder turns the returned bytes
//! into a [`DomainValue`]. Decoding never fails: short buffers read as
//! zero-padded, and unknown codes decode to a placeholder name.

use retrowatch_types::{Badge, BagItem, MoveSlot};

use crate::tables;
use crate::text;

/// How a byte range should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Fixed-width game text.
    Text,
    /// Single unsigned byte.
    U8,
    /// Big-endian `u16`.
    U16Be,
    /// Little-endian `u16`.
    U16Le,
    /// Big-endian 24-bit unsigned integer.
    U24Be,
    /// Packed binary-coded decimal, most significant byte first.
    Bcd,
    /// Number of set bits across the whole range.
    BitCount,
    /// Species index with name and dex number.
    Species,
    /// Map identifier to location name.
    Location,
    /// Status condition byte.
    Status,
    /// Elemental type code.
    ElementType,
    /// Battle mode byte.
    BattleMode,
    /// Battle type byte.
    BattleType,
    /// Move index list; zero entries are empty slots.
    MoveList,
    /// Badge bitfield.
    BadgeFlags,
    /// Bag entry: item index then quantity. Index 0 is an empty slot.
    BagEntry,
}

/// A decoded domain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainValue {
    /// Decoded text.
    Text(String),
    /// Unsigned number.
    Number(u32),
    /// A raw code with its human-readable name.
    Code {
        /// Raw byte.
        code: u8,
        /// Name, or a placeholder for undefined codes.
        name: String,
    },
    /// A species index with its name and dex number.
    Species {
        /// Raw species index.
        code: u8,
        /// Species name, or a placeholder.
        name: String,
        /// National dex number, 0 when unknown.
        pokedex_number: u8,
    },
    /// Known moves.
    Moves(Vec<MoveSlot>),
    /// All badges with their obtained flag.
    Badges(Vec<Badge>),
    /// A bag entry; `None` for an empty slot.
    Item(Option<BagItem>),
}

impl DomainValue {
    /// Numeric payload, if this is a number.
    pub const fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Decodes raw memory into domain values.
///
/// Implementations must be total: every input produces a value, and
/// unknown codes produce a clearly-marked placeholder instead of an error.
pub trait SchemaDecoder: Send + Sync {
    /// Interpret `raw` as `kind`.
    fn decode(&self, raw: &[u8], kind: FieldKind) -> DomainValue;
}

/// Decoder for Generation I (Red/Blue).
#[derive(Debug, Clone, Copy, Default)]
pub struct Gen1Decoder;

impl Gen1Decoder {
    /// Create the decoder.
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaDecoder for Gen1Decoder {
    fn decode(&self, raw: &[u8], kind: FieldKind) -> DomainValue {
        let byte = |i: usize| raw.get(i).copied().unwrap_or(0);
        match kind {
            FieldKind::Text => DomainValue::Text(text::decode_text(raw)),
            FieldKind::U8 => DomainValue::Number(u32::from(byte(0))),
            FieldKind::U16Be => {
                DomainValue::Number(u32::from(u16::from_be_bytes([byte(0), byte(1)])))
            }
            FieldKind::U16Le => {
                DomainValue::Number(u32::from(u16::from_le_bytes([byte(0), byte(1)])))
            }
            FieldKind::U24Be => {
                DomainValue::Number(u32::from_be_bytes([0, byte(0), byte(1), byte(2)]))
            }
            FieldKind::Bcd => DomainValue::Number(decode_bcd(raw)),
            FieldKind::BitCount => DomainValue::Number(count_bits(raw)),
            FieldKind::Species => {
                let code = byte(0);
                DomainValue::Species {
                    code,
                    name: tables::species_name(code)
                        .map_or_else(|| format!("Pokemon #{code}"), str::to_owned),
                    pokedex_number: tables::pokedex_number(code).unwrap_or(0),
                }
            }
            FieldKind::Location => {
                let code = byte(0);
                DomainValue::Code {
                    code,
                    name: tables::location_name(code)
                        .map_or_else(|| format!("Map {code}"), str::to_owned),
                }
            }
            FieldKind::Status => named_code(byte(0), tables::status_name),
            FieldKind::ElementType => named_code(byte(0), tables::type_name),
            FieldKind::BattleMode => named_code(byte(0), tables::battle_mode_name),
            FieldKind::BattleType => named_code(byte(0), tables::battle_type_name),
            FieldKind::MoveList => DomainValue::Moves(
                raw.iter()
                    .filter(|&&id| id != 0)
                    .map(|&id| MoveSlot {
                        id,
                        name: tables::move_name(id)
                            .map_or_else(|| format!("Move #{id}"), str::to_owned),
                    })
                    .collect(),
            ),
            FieldKind::BadgeFlags => {
                let flags = byte(0);
                DomainValue::Badges(
                    tables::BADGE_NAMES
                        .iter()
                        .zip(0u8..)
                        .map(|(name, bit)| Badge {
                            name: (*name).to_owned(),
                            obtained: flags.checked_shr(u32::from(bit)).unwrap_or(0) & 1 == 1,
                        })
                        .collect(),
                )
            }
            FieldKind::BagEntry => {
                let id = byte(0);
                // The slot is the caller's to fill in; the bytes do not carry it.
                let item = (id != 0).then(|| BagItem {
                    slot: 0,
                    id,
                    name: tables::item_name(id)
                        .map_or_else(|| format!("Item #{id}"), str::to_owned),
                    quantity: byte(1),
                });
                DomainValue::Item(item)
            }
        }
    }
}

/// Name a code through `table`, falling back to [`tables::UNKNOWN`].
fn named_code(code: u8, table: fn(u8) -> Option<&'static str>) -> DomainValue {
    DomainValue::Code {
        code,
        name: table(code).unwrap_or(tables::UNKNOWN).to_owned(),
    }
}

/// Decode packed BCD, most significant byte first.
///
/// Nibbles above 9 are not valid digits and are skipped, matching how the
/// game renders a corrupted money counter.
pub fn decode_bcd(raw: &[u8]) -> u32 {
    raw.iter()
        .flat_map(|&b| [b >> 4, b & 0x0F])
        .filter(|&digit| digit <= 9)
        .fold(0u32, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u32::from(digit))
        })
}

/// Count the set bits across a byte range.
pub fn count_bits(raw: &[u8]) -> u32 {
    raw.iter()
        .fold(0u32, |acc, b| acc.saturating_add(b.count_ones()))
}
