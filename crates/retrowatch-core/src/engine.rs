//! Engine assembly and the handle the outside world talks to.
//!
//! [`Engine::start`] wires transport, port, orchestrator, detector, store
//! and hub together and spawns the poll driver. Everything outside the
//! core (the observer, the binary) holds an [`EngineHandle`], which is
//! cheap to clone and only exposes read-only accessors and the hub's
//! register/deregister pair.

use std::sync::Arc;
use std::time::Duration;

use retrowatch_types::{ConnectionHealth, EngineStatus, GameSnapshot, SubscriberId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::detector::ChangeDetector;
use crate::driver::PollDriver;
use crate::hub::{BroadcastHub, EventReceiver};
use crate::orchestrator::Orchestrator;
use crate::port::{MemoryPort, PortPolicy};
use crate::store::SnapshotStore;
use crate::transport::MemoryTransport;

/// Lock-free view of the link health, for status reporting.
pub trait LinkStatus: Send + Sync {
    /// Current health.
    fn health(&self) -> ConnectionHealth;
    /// Consecutive failed reads or handshakes.
    fn consecutive_failures(&self) -> u32;
}

impl<T: MemoryTransport> LinkStatus for MemoryPort<T> {
    fn health(&self) -> ConnectionHealth {
        Self::health(self)
    }

    fn consecutive_failures(&self) -> u32 {
        Self::consecutive_failures(self)
    }
}

/// Read-only accessors plus subscription management.
#[derive(Clone)]
pub struct EngineHandle {
    store: Arc<SnapshotStore>,
    hub: Arc<BroadcastHub>,
    link: Arc<dyn LinkStatus>,
}

impl core::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("health", &self.link.health())
            .field("subscribers", &self.hub.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl EngineHandle {
    /// Assemble a handle from its parts.
    pub const fn new(
        store: Arc<SnapshotStore>,
        hub: Arc<BroadcastHub>,
        link: Arc<dyn LinkStatus>,
    ) -> Self {
        Self { store, hub, link }
    }

    /// The latest completed snapshot, whether or not it was broadcast.
    pub fn current_snapshot(&self) -> Arc<GameSnapshot> {
        self.store.current()
    }

    /// Register a subscriber with the hub.
    pub fn subscribe(&self) -> (SubscriberId, EventReceiver) {
        self.hub.register()
    }

    /// Deregister a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.hub.deregister(id)
    }

    /// Point-in-time status.
    pub fn status(&self) -> EngineStatus {
        let current = self.store.current();
        EngineStatus {
            health: self.link.health(),
            consecutive_failures: self.link.consecutive_failures(),
            last_successful_cycle: self.store.last_successful_cycle(),
            subscriber_count: self.hub.subscriber_count(),
            generation: current.generation,
            cycles_completed: self.store.cycles_completed(),
            events_published: self.store.events_published(),
            stale_fields_last_cycle: self.store.stale_fields_last_cycle(),
            game_loaded: current.state.game_loaded(),
        }
    }
}

/// A running engine: the spawned poll driver and what it needs to shut
/// down cleanly.
#[derive(Debug)]
pub struct Engine<T> {
    handle: EngineHandle,
    port: Arc<MemoryPort<T>>,
    hub: Arc<BroadcastHub>,
    shutdown: watch::Sender<bool>,
    driver: JoinHandle<()>,
}

impl<T: MemoryTransport + 'static> Engine<T> {
    /// Connect to the remote process and start polling.
    ///
    /// A failed initial connect is logged, not returned: the driver keeps
    /// polling and the port reconnects on its own schedule.
    pub async fn start(transport: T, config: &EngineConfig) -> Self {
        let port = Arc::new(MemoryPort::new(transport, PortPolicy::from(&config.remote)));
        if let Err(e) = port.connect().await {
            warn!(error = %e, "initial connect failed, will keep retrying");
        }

        let store = Arc::new(SnapshotStore::default());
        let hub = Arc::new(BroadcastHub::new(config.hub.queue_capacity));
        let detector = ChangeDetector::new(config.change.mode, config.change.fields.clone());
        let driver = PollDriver::new(
            Orchestrator::gen1(Arc::clone(&port)),
            detector,
            Arc::clone(&store),
            Arc::clone(&hub),
            Duration::from_millis(config.poll.interval_ms),
        );

        let (shutdown, shutdown_rx) = watch::channel(false);
        let driver = tokio::spawn(driver.run(shutdown_rx));
        let link: Arc<dyn LinkStatus> = Arc::clone(&port) as Arc<dyn LinkStatus>;
        let handle = EngineHandle::new(store, Arc::clone(&hub), link);

        info!(
            endpoint = port.endpoint(),
            platform = %config.remote.platform,
            interval_ms = config.poll.interval_ms,
            "engine started"
        );

        Self {
            handle,
            port,
            hub,
            shutdown,
            driver,
        }
    }

    /// A cloneable handle for observers.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Stop polling, close the connection and end every subscriber stream.
    pub async fn shutdown(self) {
        // The driver also stops when the sender is dropped, so a send
        // error only means it already exited.
        let _ = self.shutdown.send(true);
        if let Err(e) = self.driver.await {
            warn!(error = %e, "poll driver ended abnormally");
        }
        self.port.close().await;
        let closed = self.hub.close_all();
        info!(subscribers_closed = closed, "engine stopped");
    }
}
