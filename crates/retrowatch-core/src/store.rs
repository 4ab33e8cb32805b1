//! The current snapshot and engine counters.
//!
//! The driver is the only writer. Readers (HTTP handlers, the status
//! accessor) load the current snapshot without locking: it is an
//! immutable [`GameSnapshot`] behind an [`ArcSwap`], replaced whole at the
//! end of every cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use retrowatch_types::GameSnapshot;

use crate::orchestrator::CycleReport;

/// Sentinel for "no successful cycle yet".
const NEVER: i64 = i64::MIN;

/// Latest snapshot plus lock-free counters.
#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<GameSnapshot>,
    cycles_completed: AtomicU64,
    events_published: AtomicU64,
    stale_fields_last_cycle: AtomicU32,
    last_success_millis: AtomicI64,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(GameSnapshot::bootstrap())
    }
}

impl SnapshotStore {
    /// Start from `initial`.
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            cycles_completed: AtomicU64::new(0),
            events_published: AtomicU64::new(0),
            stale_fields_last_cycle: AtomicU32::new(0),
            last_success_millis: AtomicI64::new(NEVER),
        }
    }

    /// The latest completed snapshot, whether or not it was broadcast.
    pub fn current(&self) -> Arc<GameSnapshot> {
        self.current.load_full()
    }

    /// Install the result of a finished cycle.
    ///
    /// The cycle counts as successful when at least one read was fresh.
    pub fn commit(&self, snapshot: Arc<GameSnapshot>, report: &CycleReport) {
        let finished_at = snapshot.captured_at;
        self.current.store(snapshot);
        self.cycles_completed.fetch_add(1, Ordering::AcqRel);
        self.stale_fields_last_cycle
            .store(report.stale_count(), Ordering::Release);
        if report.any_fresh() {
            self.last_success_millis
                .store(finished_at.timestamp_millis(), Ordering::Release);
        }
    }

    /// Count one published change event.
    pub fn record_event(&self) {
        self.events_published.fetch_add(1, Ordering::AcqRel);
    }

    /// Cycles completed since start.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed.load(Ordering::Acquire)
    }

    /// Change events published since start.
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Acquire)
    }

    /// Stale fields in the last cycle.
    pub fn stale_fields_last_cycle(&self) -> u32 {
        self.stale_fields_last_cycle.load(Ordering::Acquire)
    }

    /// Capture time of the last cycle with at least one fresh read.
    pub fn last_successful_cycle(&self) -> Option<DateTime<Utc>> {
        match self.last_success_millis.load(Ordering::Acquire) {
            NEVER => None,
            millis => DateTime::from_timestamp_millis(millis),
        }
    }
}
