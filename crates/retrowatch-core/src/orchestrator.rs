//! The snapshot orchestrator.
//!
//! Builds one [`GameSnapshot`] per cycle by folding the read plan over a
//! clone of the previous snapshot. Every field of the result is either
//! freshly read this cycle or carried over from `previous`; nothing is
//! ever left half-written.

use std::sync::Arc;

use chrono::Utc;
use retrowatch_schema::{DomainValue, FieldKind, Gen1Decoder, MemoryLayout, Region, SchemaDecoder};
use retrowatch_types::{BagItem, GameSnapshot, GameState, PartyMember};
use tracing::{debug, trace};

use crate::plan::{self, FieldRead, HP_FIELDS, RecordRead};
use crate::port::RangeReader;

/// What happened during one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Reads that succeeded.
    pub fresh_reads: u32,
    /// Fields that kept their previous value, e.g. `money` or
    /// `party[1].current_hp`.
    pub stale_fields: Vec<String>,
}

impl CycleReport {
    /// Whether at least one read succeeded.
    pub const fn any_fresh(&self) -> bool {
        self.fresh_reads > 0
    }

    /// Number of stale fields, saturating.
    pub fn stale_count(&self) -> u32 {
        u32::try_from(self.stale_fields.len()).unwrap_or(u32::MAX)
    }

    fn fresh(&mut self) {
        self.fresh_reads = self.fresh_reads.saturating_add(1);
    }

    fn stale(&mut self, field: impl Into<String>) {
        self.stale_fields.push(field.into());
    }
}

/// Result of [`Orchestrator::build_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    /// The new snapshot, one generation after the previous one.
    pub snapshot: GameSnapshot,
    /// Freshness report for the cycle.
    pub report: CycleReport,
}

/// Runs the read plan against a [`RangeReader`].
#[derive(Debug)]
pub struct Orchestrator<R, D = Gen1Decoder> {
    reader: Arc<R>,
    decoder: D,
    layout: MemoryLayout,
    scalars: Vec<FieldRead<GameState>>,
    members: Vec<RecordRead<PartyMember>>,
}

impl<R: RangeReader> Orchestrator<R> {
    /// Orchestrator for Red/Blue with the Generation I decoder.
    pub fn gen1(reader: Arc<R>) -> Self {
        Self::new(reader, Gen1Decoder::new(), MemoryLayout::red_blue())
    }
}

impl<R: RangeReader, D: SchemaDecoder> Orchestrator<R, D> {
    /// Build an orchestrator over an explicit decoder and layout.
    pub fn new(reader: Arc<R>, decoder: D, layout: MemoryLayout) -> Self {
        let scalars = plan::player_plan(&layout);
        let members = plan::member_plan(&layout);
        Self {
            reader,
            decoder,
            layout,
            scalars,
            members,
        }
    }

    /// The layout being read.
    pub const fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// Build the next snapshot from `previous`.
    ///
    /// Never fails: read errors are absorbed into stale values and
    /// reported in [`CycleOutcome::report`].
    pub async fn build_snapshot(&self, previous: &GameSnapshot) -> CycleOutcome {
        let mut state = previous.state.clone();
        let mut report = CycleReport::default();

        for entry in &self.scalars {
            match self.read(entry.region, entry.kind).await {
                Some(value) => {
                    (entry.apply)(&mut state, value);
                    report.fresh();
                }
                None => report.stale(entry.name),
            }
        }

        self.read_party(&previous.state, &mut state, &mut report).await;
        self.read_bag(&previous.state, &mut state, &mut report).await;

        debug!(
            generation = previous.generation.saturating_add(1),
            fresh = report.fresh_reads,
            stale = report.stale_fields.len(),
            "snapshot built"
        );

        CycleOutcome {
            snapshot: GameSnapshot {
                generation: previous.generation.saturating_add(1),
                captured_at: Utc::now(),
                state,
            },
            report,
        }
    }

    async fn read(&self, region: Region, kind: FieldKind) -> Option<DomainValue> {
        match self.reader.read_range(region.address, region.length).await {
            Ok(raw) => Some(self.decoder.decode(&raw, kind)),
            Err(err) => {
                trace!(error = %err, "read failed, keeping previous value");
                None
            }
        }
    }

    /// Read a count byte and clamp it to `max`.
    async fn read_count(&self, region: Region, max: u8) -> Option<u8> {
        let value = self.read(region, FieldKind::U8).await?;
        let raw = value.as_number()?;
        let clamped = u8::try_from(raw).unwrap_or(u8::MAX).min(max);
        if u32::from(clamped) != raw {
            debug!(raw, clamped, "count out of range, clamped");
        }
        Some(clamped)
    }

    async fn read_party(&self, previous: &GameState, state: &mut GameState, report: &mut CycleReport) {
        let Some(count) = self
            .read_count(self.layout.party_count, self.layout.max_party)
            .await
        else {
            // The whole party is already carried over in `state`.
            report.stale("team_count");
            report.stale("party");
            return;
        };
        report.fresh();

        let mut party = Vec::with_capacity(usize::from(count));
        for index in 0..count {
            let Some(base) = self.layout.party_slot(index) else {
                break;
            };
            let carried = previous.party.iter().find(|m| m.slot == index);
            let species_region = self.layout.party_record.species.at(base);
            let species = match species_region {
                Some(region) => self.read(region, FieldKind::Species).await,
                None => None,
            };

            let Some(DomainValue::Species {
                code,
                name,
                pokedex_number,
            }) = species
            else {
                report.stale(format!("party[{index}]"));
                if let Some(carried) = carried {
                    party.push(carried.clone());
                }
                continue;
            };
            report.fresh();

            let mut member = carried.cloned().unwrap_or_default();
            member.slot = index;
            member.species = code;
            member.name = name;
            member.pokedex_number = pokedex_number;

            let mut hp_inputs_fresh = true;
            for entry in &self.members {
                let value = match entry.field.at(base) {
                    Some(region) => self.read(region, entry.kind).await,
                    None => None,
                };
                match value {
                    Some(value) => {
                        (entry.apply)(&mut member, value);
                        report.fresh();
                    }
                    None => {
                        if HP_FIELDS.contains(&entry.name) {
                            hp_inputs_fresh = false;
                        }
                        report.stale(format!("party[{index}].{}", entry.name));
                    }
                }
            }
            if hp_inputs_fresh {
                member.hp_percent = plan::hp_percent(member.current_hp, member.max_hp);
            }
            party.push(member);
        }

        state.team_count = count;
        state.party = party;
    }

    async fn read_bag(&self, previous: &GameState, state: &mut GameState, report: &mut CycleReport) {
        let Some(count) = self
            .read_count(self.layout.bag_count, self.layout.max_bag_items)
            .await
        else {
            report.stale("bag_item_count");
            report.stale("bag_items");
            return;
        };
        report.fresh();

        let mut items: Vec<BagItem> = Vec::with_capacity(usize::from(count));
        let mut all_fresh = true;
        for index in 0..count {
            let Some(region) = self.layout.bag_entry(index) else {
                break;
            };
            match self.read(region, FieldKind::BagEntry).await {
                Some(DomainValue::Item(Some(mut item))) => {
                    report.fresh();
                    item.slot = index;
                    items.push(item);
                }
                Some(_) => report.fresh(),
                None => {
                    all_fresh = false;
                    report.stale(format!("bag_items[{index}]"));
                    // An empty slot has no previous entry and stays empty.
                    if let Some(carried) = previous.bag_items.iter().find(|i| i.slot == index) {
                        items.push(carried.clone());
                    }
                }
            }
        }

        if all_fresh {
            state.bag_item_count = u8::try_from(items.len()).unwrap_or(u8::MAX);
        } else {
            report.stale("bag_item_count");
        }
        state.bag_items = items;
    }
}
