//! The poll driver: the single task that runs poll, decode, detect and
//! publish, in that order, once per tick.
//!
//! It is the only writer of snapshots, so generations and change events
//! are totally ordered. A cycle that overruns its tick makes the timer
//! skip the missed ticks instead of queueing them up.

use std::sync::Arc;
use std::time::Duration;

use retrowatch_schema::{Gen1Decoder, SchemaDecoder};
use retrowatch_types::{ChangeEvent, GameSnapshot};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::detector::ChangeDetector;
use crate::hub::{BroadcastHub, PublishReport};
use crate::orchestrator::{CycleReport, Orchestrator};
use crate::port::RangeReader;
use crate::store::SnapshotStore;

/// What one cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    /// Generation of the snapshot built.
    pub generation: u64,
    /// Freshness report from the orchestrator.
    pub report: CycleReport,
    /// Set when the snapshot was published as a change event.
    pub published: Option<PublishReport>,
}

/// Owns the orchestrator and detector and feeds the hub.
#[derive(Debug)]
pub struct PollDriver<R, D = Gen1Decoder> {
    orchestrator: Orchestrator<R, D>,
    detector: ChangeDetector,
    store: Arc<SnapshotStore>,
    hub: Arc<BroadcastHub>,
    interval: Duration,
    last_emitted: Option<Arc<GameSnapshot>>,
}

impl<R: RangeReader, D: SchemaDecoder> PollDriver<R, D> {
    /// Wire a driver. `interval` is the time between cycle starts.
    pub const fn new(
        orchestrator: Orchestrator<R, D>,
        detector: ChangeDetector,
        store: Arc<SnapshotStore>,
        hub: Arc<BroadcastHub>,
        interval: Duration,
    ) -> Self {
        Self {
            orchestrator,
            detector,
            store,
            hub,
            interval,
            last_emitted: None,
        }
    }

    /// Run one cycle to completion.
    pub async fn run_cycle(&mut self) -> CycleSummary {
        let previous = self.store.current();
        let outcome = self.orchestrator.build_snapshot(&previous).await;
        let snapshot = Arc::new(outcome.snapshot);
        let generation = snapshot.generation;
        self.store.commit(Arc::clone(&snapshot), &outcome.report);

        let published = if self
            .detector
            .should_emit(self.last_emitted.as_deref(), &snapshot)
        {
            let event = Arc::new(ChangeEvent::new(Arc::clone(&snapshot)));
            let report = self.hub.publish(&event);
            self.store.record_event();
            self.last_emitted = Some(snapshot);
            debug!(
                generation,
                delivered = report.delivered,
                dropped = report.dropped,
                "change event published"
            );
            Some(report)
        } else {
            None
        };

        CycleSummary {
            generation,
            report: outcome.report,
            published,
        }
    }

    /// Poll until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// A shutdown that arrives mid-cycle abandons the cycle; dropping it
    /// releases the port for the caller to close.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_ms = self.interval.as_millis(), "poll driver started");

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    info!("shutdown requested mid-cycle, abandoning cycle");
                    break;
                }
                summary = self.run_cycle() => {
                    debug!(
                        generation = summary.generation,
                        fresh = summary.report.fresh_reads,
                        stale = summary.report.stale_fields.len(),
                        emitted = summary.published.is_some(),
                        "cycle complete"
                    );
                }
            }
        }

        info!(
            cycles = self.store.cycles_completed(),
            events = self.store.events_published(),
            "poll driver stopped"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

    use super::*;
    use crate::error::ReadError;

    /// Every byte reads as the current `value`; counts are forced to zero.
    #[derive(Debug, Default)]
    struct Flat {
        value: AtomicU8,
        reads: AtomicUsize,
        gate: Mutex<Option<Arc<tokio::sync::Notify>>>,
        /// Delay applied once, to the next read only.
        stall: Mutex<Option<Duration>>,
    }

    impl RangeReader for Flat {
        async fn read_range(&self, address: u32, length: usize) -> Result<Vec<u8>, ReadError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let stall = self.stall.lock().unwrap().take();
            if let Some(stall) = stall {
                tokio::time::sleep(stall).await;
            }
            let byte = if address == 0xD163 || address == 0xD31D {
                0
            } else {
                self.value.load(Ordering::SeqCst)
            };
            Ok(vec![byte; length])
        }
    }

    fn driver(reader: Arc<Flat>) -> (PollDriver<Flat>, Arc<SnapshotStore>, Arc<BroadcastHub>) {
        let store = Arc::new(SnapshotStore::default());
        let hub = Arc::new(BroadcastHub::new(8));
        let driver = PollDriver::new(
            Orchestrator::gen1(reader),
            ChangeDetector::default(),
            Arc::clone(&store),
            Arc::clone(&hub),
            Duration::from_millis(100),
        );
        (driver, store, hub)
    }

    #[tokio::test]
    async fn first_cycle_publishes_and_repeat_does_not() {
        let reader = Arc::new(Flat::default());
        let (mut driver, store, hub) = driver(Arc::clone(&reader));
        let (_id, mut rx) = hub.register();

        let first = driver.run_cycle().await;
        assert_eq!(first.generation, 1);
        assert!(first.published.is_some());

        let second = driver.run_cycle().await;
        assert_eq!(second.generation, 2);
        assert!(second.published.is_none());
        assert_eq!(store.current().generation, 2);
        assert_eq!(store.events_published(), 1);

        reader.value.store(0x01, Ordering::SeqCst);
        let third = driver.run_cycle().await;
        assert!(third.published.is_some());

        let generations: Vec<u64> = [rx.recv().await.unwrap(), rx.recv().await.unwrap()]
            .iter()
            .map(|e| e.generation)
            .collect();
        assert_eq!(generations, vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_until_shutdown() {
        let reader = Arc::new(Flat::default());
        let (driver, store, _hub) = driver(Arc::clone(&reader));
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(rx));

        tokio::time::sleep(Duration::from_millis(350)).await;
        tx.send(true).unwrap();
        task.await.unwrap();

        // Ticks at 0, 100, 200 and 300ms.
        assert_eq!(store.cycles_completed(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_abandons_in_flight_cycle() {
        let reader = Arc::new(Flat::default());
        let gate = Arc::new(tokio::sync::Notify::new());
        *reader.gate.lock().unwrap() = Some(Arc::clone(&gate));
        let (driver, store, _hub) = driver(Arc::clone(&reader));
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(rx));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
        tx.send(true).unwrap();
        task.await.unwrap();

        assert_eq!(store.cycles_completed(), 0);
        assert_eq!(store.current().generation, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycle_skips_missed_ticks() {
        let reader = Arc::new(Flat::default());
        *reader.stall.lock().unwrap() = Some(Duration::from_millis(350));
        let (driver, store, _hub) = driver(Arc::clone(&reader));
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(rx));

        tokio::time::sleep(Duration::from_millis(620)).await;
        tx.send(true).unwrap();
        task.await.unwrap();

        // The first cycle ends at 350ms and the ticks at 100, 200 and 300ms
        // collapse into one immediate cycle. The grid then resumes at 400, 500
        // and 600ms. A catch-up burst would give 7 cycles here.
        assert_eq!(store.cycles_completed(), 5);
    }
}
