//! Memory layout of Generation I (Red/Blue) work RAM.
//!
//! A [`MemoryLayout`] says which byte ranges hold which fields. The
//! orchestrator turns it into an ordered read plan; nothing here touches
//! the connection.

/// A contiguous byte range in the remote address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// First byte of the range.
    pub address: u32,
    /// Number of bytes.
    pub length: usize,
}

impl Region {
    /// Create a region.
    pub const fn new(address: u32, length: usize) -> Self {
        Self { address, length }
    }
}

/// A field inside a repeated record, relative to the record's base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordField {
    /// Byte offset from the record base.
    pub offset: u32,
    /// Number of bytes.
    pub length: usize,
}

impl RecordField {
    /// Create a record field.
    pub const fn new(offset: u32, length: usize) -> Self {
        Self { offset, length }
    }

    /// Resolve against a record base address. `None` on address overflow.
    pub const fn at(self, base: u32) -> Option<Region> {
        match base.checked_add(self.offset) {
            Some(address) => Some(Region::new(address, self.length)),
            None => None,
        }
    }
}

/// Field offsets inside one party slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyRecord {
    /// Species index (1 byte). The slot's identity.
    pub species: RecordField,
    /// Current HP (u16 BE).
    pub current_hp: RecordField,
    /// Status condition (1 byte).
    pub status: RecordField,
    /// Primary type (1 byte).
    pub type1: RecordField,
    /// Secondary type (1 byte).
    pub type2: RecordField,
    /// Four move indices.
    pub moves: RecordField,
    /// Experience (u24 BE).
    pub exp_points: RecordField,
    /// Level (1 byte).
    pub level: RecordField,
    /// Max HP (u16 BE).
    pub max_hp: RecordField,
    /// Attack (u16 BE).
    pub attack: RecordField,
    /// Defense (u16 BE).
    pub defense: RecordField,
    /// Speed (u16 BE).
    pub speed: RecordField,
    /// Special (u16 BE).
    pub special: RecordField,
}

/// Where every mirrored field lives in the remote address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Trainer name, 11 bytes of game text.
    pub player_name: Region,
    /// Trainer ID.
    pub player_id: Region,
    /// Money, 3 bytes packed BCD.
    pub money: Region,
    /// Party size. Gates the party slot reads.
    pub party_count: Region,
    /// Map identifier.
    pub current_map: Region,
    /// X coordinate.
    pub player_x: Region,
    /// Y coordinate.
    pub player_y: Region,
    /// Badge bitfield.
    pub badges: Region,
    /// Seen-species bit array.
    pub pokedex_seen: Region,
    /// Caught-species bit array.
    pub pokedex_caught: Region,
    /// Play time hours.
    pub play_hours: Region,
    /// Play time minutes.
    pub play_minutes: Region,
    /// Play time seconds.
    pub play_seconds: Region,
    /// Bag entry count. Gates the bag entry reads.
    pub bag_count: Region,
    /// First bag entry.
    pub bag_items_start: u32,
    /// Bytes per bag entry (item id, quantity).
    pub bag_entry_length: usize,
    /// Base address of party slot 0.
    pub party_base: u32,
    /// Distance between party slots.
    pub party_stride: u32,
    /// Offsets inside a party slot.
    pub party_record: PartyRecord,
    /// Battle mode byte.
    pub battle_mode: Region,
    /// Battle type byte.
    pub battle_type: Region,
    /// Upper bound on party slots read per cycle.
    pub max_party: u8,
    /// Upper bound on bag entries read per cycle.
    pub max_bag_items: u8,
}

impl MemoryLayout {
    /// Layout of the English Red and Blue releases.
    pub const fn red_blue() -> Self {
        Self {
            player_name: Region::new(0xD158, 11),
            player_id: Region::new(0xD359, 2),
            money: Region::new(0xD347, 3),
            party_count: Region::new(0xD163, 1),
            current_map: Region::new(0xD35E, 1),
            player_x: Region::new(0xD362, 1),
            player_y: Region::new(0xD361, 1),
            badges: Region::new(0xD356, 1),
            pokedex_seen: Region::new(0xD30A, 19),
            pokedex_caught: Region::new(0xD2F7, 19),
            play_hours: Region::new(0xDA40, 2),
            play_minutes: Region::new(0xDA43, 1),
            play_seconds: Region::new(0xDA44, 1),
            bag_count: Region::new(0xD31D, 1),
            bag_items_start: 0xD31E,
            bag_entry_length: 2,
            party_base: 0xD16B,
            party_stride: 0x2C,
            party_record: PartyRecord {
                species: RecordField::new(0, 1),
                current_hp: RecordField::new(1, 2),
                status: RecordField::new(4, 1),
                type1: RecordField::new(5, 1),
                type2: RecordField::new(6, 1),
                moves: RecordField::new(8, 4),
                exp_points: RecordField::new(14, 3),
                level: RecordField::new(33, 1),
                max_hp: RecordField::new(34, 2),
                attack: RecordField::new(36, 2),
                defense: RecordField::new(38, 2),
                speed: RecordField::new(40, 2),
                special: RecordField::new(42, 2),
            },
            battle_mode: Region::new(0xD057, 1),
            battle_type: Region::new(0xD05A, 1),
            max_party: 6,
            max_bag_items: 20,
        }
    }

    /// Base address of a party slot. `None` past `max_party` or on overflow.
    pub fn party_slot(&self, index: u8) -> Option<u32> {
        if index >= self.max_party {
            return None;
        }
        let offset = self.party_stride.checked_mul(u32::from(index))?;
        self.party_base.checked_add(offset)
    }

    /// Region of a bag entry. `None` past `max_bag_items` or on overflow.
    pub fn bag_entry(&self, index: u8) -> Option<Region> {
        if index >= self.max_bag_items {
            return None;
        }
        let entry_len = u32::try_from(self.bag_entry_length).ok()?;
        let offset = entry_len.checked_mul(u32::from(index))?;
        let address = self.bag_items_start.checked_add(offset)?;
        Some(Region::new(address, self.bag_entry_length))
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::red_blue()
    }
}
