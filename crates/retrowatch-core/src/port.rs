//! The remote memory port.
//!
//! [`MemoryPort`] owns the single logical connection to the remote
//! process and exposes one operation, "read N bytes at address A". It
//! serializes callers (the remote protocol is request/response, never
//! pipelined), bounds every attempt with an adaptive timeout, retries with
//! capped exponential backoff, and drives an explicit health state
//! machine:
//!
//! ```text
//!   Disconnected --connect--> Connecting --ok--> Connected
//!        ^                        |                 |  ^
//!        |                      fail          read fails | read ok
//!        |                        v                 v  |
//!        +--------------- Disconnected <-- threshold -- Degraded
//! ```
//!
//! Once `failure_threshold` consecutive failures accumulate the transport
//! is closed and the port is `Disconnected`. The next read performs a
//! fresh handshake, but reconnects are spaced by their own capped
//! backoff so a dead remote never becomes a tight failure loop.

use std::future::Future;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use std::time::Duration;

use rand::Rng as _;
use retrowatch_types::ConnectionHealth;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::RemoteConfig;
use crate::error::{ConnectionError, ReadError, ReadFailure, TransportError};
use crate::transport::{MemoryTransport, Platform};

/// Starting per-attempt read timeout.
pub const DEFAULT_BASE_TIMEOUT: Duration = Duration::from_millis(250);

/// Ceiling for the adaptive read timeout and for handshakes.
pub const DEFAULT_MAX_TIMEOUT: Duration = Duration::from_secs(5);

/// Attempts per `read_range` call before the read is reported failed.
pub const DEFAULT_READ_ATTEMPTS: u32 = 2;

/// First inter-retry delay.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Ceiling for the inter-retry delay.
pub const DEFAULT_RETRY_BACKOFF_CAP: Duration = Duration::from_secs(1);

/// Consecutive failures that move the port to `Disconnected`.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// First delay between reconnect attempts.
pub const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_millis(500);

/// Ceiling for the delay between reconnect attempts.
pub const DEFAULT_RECONNECT_BACKOFF_CAP: Duration = Duration::from_secs(10);

/// Timing and threshold parameters of the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPolicy {
    /// Platform declared during the handshake.
    pub platform: Platform,
    /// Starting and minimum per-attempt timeout.
    pub base_timeout: Duration,
    /// Maximum per-attempt timeout. No single attempt waits longer.
    pub max_timeout: Duration,
    /// Attempts per read call.
    pub read_attempts: u32,
    /// First inter-retry delay.
    pub retry_backoff: Duration,
    /// Inter-retry delay ceiling.
    pub retry_backoff_cap: Duration,
    /// Consecutive failures before `Disconnected`.
    pub failure_threshold: u32,
    /// First reconnect delay.
    pub reconnect_backoff: Duration,
    /// Reconnect delay ceiling.
    pub reconnect_backoff_cap: Duration,
}

impl Default for PortPolicy {
    fn default() -> Self {
        Self {
            platform: Platform::GameBoy,
            base_timeout: DEFAULT_BASE_TIMEOUT,
            max_timeout: DEFAULT_MAX_TIMEOUT,
            read_attempts: DEFAULT_READ_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            retry_backoff_cap: DEFAULT_RETRY_BACKOFF_CAP,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
            reconnect_backoff_cap: DEFAULT_RECONNECT_BACKOFF_CAP,
        }
    }
}

impl From<&RemoteConfig> for PortPolicy {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            platform: config.platform,
            base_timeout: Duration::from_millis(config.base_timeout_ms),
            max_timeout: Duration::from_millis(config.max_timeout_ms),
            read_attempts: config.read_attempts.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            retry_backoff_cap: Duration::from_millis(config.retry_backoff_cap_ms),
            failure_threshold: config.failure_threshold.max(1),
            reconnect_backoff: Duration::from_millis(config.reconnect_backoff_ms),
            reconnect_backoff_cap: Duration::from_millis(config.reconnect_backoff_cap_ms),
        }
    }
}

impl PortPolicy {
    /// Delay before retry number `attempt` (0-based), with up to 25% jitter,
    /// never above `retry_backoff_cap`.
    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let delay = self
            .retry_backoff
            .saturating_mul(factor)
            .min(self.retry_backoff_cap);
        let jitter_ceiling = u64::try_from(delay.as_millis() / 4).unwrap_or(0);
        let jitter = if jitter_ceiling == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ceiling)
        };
        delay
            .saturating_add(Duration::from_millis(jitter))
            .min(self.retry_backoff_cap)
    }
}

/// Anything that can read a range of remote memory.
///
/// The orchestrator depends on this rather than on [`MemoryPort`] so that
/// read plans can be exercised against scripted memory.
pub trait RangeReader: Send + Sync {
    /// Read exactly `length` bytes at `address`.
    fn read_range(
        &self,
        address: u32,
        length: usize,
    ) -> impl Future<Output = Result<Vec<u8>, ReadError>> + Send;
}

/// Mutable link state, only touched while holding the port lock.
#[derive(Debug)]
struct Link<T> {
    transport: T,
    timeout: Duration,
    reconnect_delay: Duration,
    next_reconnect_at: Option<Instant>,
    closed: bool,
}

/// The single, serialized, self-healing connection to the remote process.
#[derive(Debug)]
pub struct MemoryPort<T> {
    policy: PortPolicy,
    endpoint: String,
    link: Mutex<Link<T>>,
    health: AtomicU8,
    failures: AtomicU32,
}

impl<T: MemoryTransport> MemoryPort<T> {
    /// Wrap a closed transport. No I/O happens until the first connect or read.
    pub fn new(transport: T, policy: PortPolicy) -> Self {
        let endpoint = transport.endpoint();
        Self {
            link: Mutex::new(Link {
                transport,
                timeout: policy.base_timeout,
                reconnect_delay: policy.reconnect_backoff,
                next_reconnect_at: None,
                closed: false,
            }),
            policy,
            endpoint,
            health: AtomicU8::new(ConnectionHealth::Disconnected.as_u8()),
            failures: AtomicU32::new(0),
        }
    }

    /// Current health, readable without taking the port lock.
    pub fn health(&self) -> ConnectionHealth {
        ConnectionHealth::from_u8(self.health.load(Ordering::Acquire))
    }

    /// Consecutive failed reads or handshakes.
    pub fn consecutive_failures(&self) -> u32 {
        self.failures.load(Ordering::Acquire)
    }

    /// `host:port` of the remote process.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The policy this port runs under.
    pub const fn policy(&self) -> &PortPolicy {
        &self.policy
    }

    /// Current adaptive per-attempt timeout.
    pub async fn current_timeout(&self) -> Duration {
        self.link.lock().await.timeout
    }

    /// Establish the connection and perform the handshake.
    ///
    /// An explicit connect always attempts the handshake, even while
    /// reconnects triggered by reads are being deferred.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the remote is unreachable, rejects
    /// the handshake, or the port has been closed.
    pub async fn connect(&self) -> Result<(), ConnectionError> {
        let mut link = self.link.lock().await;
        if link.closed {
            return Err(ConnectionError::Closed);
        }
        self.handshake(&mut link).await
    }

    /// Read exactly `length` bytes at `address`.
    ///
    /// Reconnects first if the port is disconnected. Each attempt is
    /// bounded by the adaptive timeout, which never exceeds
    /// `max_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] carrying the requested range when every
    /// attempt fails or the connection cannot be established.
    pub async fn read_range(&self, address: u32, length: usize) -> Result<Vec<u8>, ReadError> {
        let mut link = self.link.lock().await;
        if link.closed {
            return Err(ReadError::new(address, length, ConnectionError::Closed.into()));
        }
        if !self.health().is_usable() {
            self.reconnect(&mut link)
                .await
                .map_err(|e| ReadError::new(address, length, e.into()))?;
        }

        let mut last_failure = ReadFailure::Timeout(link.timeout);
        for attempt in 0..self.policy.read_attempts {
            let timeout = link.timeout;
            let outcome =
                tokio::time::timeout(timeout, link.transport.read(address, length, timeout)).await;
            let failure = match outcome {
                Ok(Ok(bytes)) if bytes.len() == length => {
                    self.record_success(&mut link);
                    return Ok(bytes);
                }
                Ok(Ok(bytes)) => ReadFailure::BadReply(format!(
                    "expected {length} bytes, got {}",
                    bytes.len()
                )),
                Ok(Err(err)) => ReadFailure::from(err),
                Err(_elapsed) => ReadFailure::Timeout(timeout),
            };
            debug!(
                address = format_args!("{address:#06X}"),
                length,
                attempt,
                error = %failure,
                "read attempt failed"
            );
            last_failure = failure;

            if self.record_failure(&mut link).await {
                break;
            }
            if attempt.saturating_add(1) < self.policy.read_attempts {
                tokio::time::sleep(self.policy.retry_delay(attempt)).await;
            }
        }

        Err(ReadError::new(address, length, last_failure))
    }

    /// Close the transport for shutdown. Later calls fail with
    /// [`ConnectionError::Closed`].
    pub async fn close(&self) {
        let mut link = self.link.lock().await;
        link.closed = true;
        link.transport.close().await;
        self.set_health(ConnectionHealth::Disconnected);
        info!(endpoint = %self.endpoint, "memory port closed");
    }

    /// Reconnect unless the reconnect backoff says to wait.
    async fn reconnect(&self, link: &mut Link<T>) -> Result<(), ConnectionError> {
        if let Some(at) = link.next_reconnect_at {
            let now = Instant::now();
            if now < at {
                return Err(ConnectionError::Deferred {
                    remaining: at.saturating_duration_since(now),
                });
            }
        }
        self.handshake(link).await
    }

    async fn handshake(&self, link: &mut Link<T>) -> Result<(), ConnectionError> {
        self.set_health(ConnectionHealth::Connecting);
        link.transport.close().await;

        let max = self.policy.max_timeout;
        let result = match tokio::time::timeout(max, link.transport.open(self.policy.platform, max))
            .await
        {
            Ok(inner) => inner,
            Err(_elapsed) => Err(TransportError::Timeout(max)),
        };

        match result {
            Ok(()) => {
                link.timeout = self.policy.base_timeout;
                link.next_reconnect_at = None;
                self.failures.store(0, Ordering::Release);
                self.set_health(ConnectionHealth::Connected);
                info!(
                    endpoint = %self.endpoint,
                    platform = %self.policy.platform,
                    "connected to remote process"
                );
                Ok(())
            }
            Err(err) => {
                let failures = self.bump_failures();
                self.schedule_reconnect(link);
                self.set_health(ConnectionHealth::Disconnected);
                let reason = err.to_string();
                warn!(
                    endpoint = %self.endpoint,
                    failures,
                    error = %reason,
                    "connection attempt failed"
                );
                Err(match err {
                    TransportError::Malformed(_) | TransportError::Remote(_) => {
                        ConnectionError::Handshake {
                            endpoint: self.endpoint.clone(),
                            reason,
                        }
                    }
                    TransportError::Timeout(_) | TransportError::Io(_) | TransportError::NotOpen => {
                        ConnectionError::Unreachable {
                            endpoint: self.endpoint.clone(),
                            reason,
                        }
                    }
                })
            }
        }
    }

    fn record_success(&self, link: &mut Link<T>) {
        let relaxed = link
            .timeout
            .checked_div(2)
            .unwrap_or(self.policy.base_timeout);
        link.timeout = relaxed.max(self.policy.base_timeout);
        link.reconnect_delay = self.policy.reconnect_backoff;
        self.failures.store(0, Ordering::Release);
        if self.health() != ConnectionHealth::Connected {
            info!(endpoint = %self.endpoint, "remote reads recovered");
            self.set_health(ConnectionHealth::Connected);
        }
    }

    /// Returns `true` when this failure crossed the threshold and the
    /// transport was closed.
    async fn record_failure(&self, link: &mut Link<T>) -> bool {
        link.timeout = link
            .timeout
            .saturating_mul(2)
            .min(self.policy.max_timeout);
        let failures = self.bump_failures();

        if failures >= self.policy.failure_threshold {
            link.transport.close().await;
            self.schedule_reconnect(link);
            self.set_health(ConnectionHealth::Disconnected);
            warn!(
                endpoint = %self.endpoint,
                failures,
                threshold = self.policy.failure_threshold,
                "failure threshold crossed, connection marked disconnected"
            );
            return true;
        }

        if self.health() == ConnectionHealth::Connected {
            warn!(endpoint = %self.endpoint, failures, "remote reads degraded");
        }
        self.set_health(ConnectionHealth::Degraded);
        false
    }

    fn schedule_reconnect(&self, link: &mut Link<T>) {
        let delay = link.reconnect_delay;
        link.next_reconnect_at = Instant::now().checked_add(delay);
        link.reconnect_delay = delay
            .saturating_mul(2)
            .min(self.policy.reconnect_backoff_cap);
    }

    fn bump_failures(&self) -> u32 {
        let previous = self
            .failures
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_add(1))
            })
            .unwrap_or(u32::MAX);
        previous.saturating_add(1)
    }

    fn set_health(&self, health: ConnectionHealth) {
        self.health.store(health.as_u8(), Ordering::Release);
    }
}

impl<T: MemoryTransport> RangeReader for MemoryPort<T> {
    fn read_range(
        &self,
        address: u32,
        length: usize,
    ) -> impl Future<Output = Result<Vec<u8>, ReadError>> + Send {
        Self::read_range(self, address, length)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Debug, Clone)]
    enum Step {
        Bytes(Vec<u8>),
        Fail,
        Hang,
    }

    #[derive(Debug, Default)]
    struct Script {
        reads: VecDeque<Step>,
        fallback: Option<Step>,
        open_fails: bool,
    }

    #[derive(Debug, Clone, Default)]
    struct Tally {
        script: Arc<std::sync::Mutex<Script>>,
        opens: Arc<AtomicUsize>,
        reads: Arc<AtomicUsize>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
    }

    impl Tally {
        fn push(&self, step: Step) {
            self.script.lock().unwrap().reads.push_back(step);
        }

        fn always(&self, step: Step) {
            self.script.lock().unwrap().fallback = Some(step);
        }

        fn fail_opens(&self, fail: bool) {
            self.script.lock().unwrap().open_fails = fail;
        }

        fn opens(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }
    }

    struct ScriptedTransport {
        tally: Tally,
    }

    impl MemoryTransport for ScriptedTransport {
        async fn open(&mut self, _platform: Platform, _timeout: Duration) -> Result<(), TransportError> {
            self.tally.opens.fetch_add(1, Ordering::SeqCst);
            if self.tally.script.lock().unwrap().open_fails {
                Err(TransportError::Io(std::io::Error::from(
                    std::io::ErrorKind::ConnectionRefused,
                )))
            } else {
                Ok(())
            }
        }

        async fn read(
            &mut self,
            _address: u32,
            length: usize,
            _timeout: Duration,
        ) -> Result<Vec<u8>, TransportError> {
            self.tally.reads.fetch_add(1, Ordering::SeqCst);
            let now = self.tally.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
            self.tally.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let step = {
                let mut script = self.tally.script.lock().unwrap();
                script
                    .reads
                    .pop_front()
                    .or_else(|| script.fallback.clone())
                    .unwrap_or(Step::Bytes(vec![0; length]))
            };
            let result = match step {
                Step::Bytes(bytes) => {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok(bytes)
                }
                Step::Fail => Err(TransportError::Malformed(String::from("scripted"))),
                Step::Hang => std::future::pending().await,
            };
            self.tally.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }

        async fn close(&mut self) {}

        fn endpoint(&self) -> String {
            String::from("scripted:0")
        }
    }

    fn port_with(policy: PortPolicy) -> (MemoryPort<ScriptedTransport>, Tally) {
        let tally = Tally::default();
        let port = MemoryPort::new(
            ScriptedTransport {
                tally: tally.clone(),
            },
            policy,
        );
        (port, tally)
    }

    fn fast_policy() -> PortPolicy {
        PortPolicy {
            base_timeout: Duration::from_millis(100),
            max_timeout: Duration::from_millis(800),
            read_attempts: 1,
            retry_backoff: Duration::from_millis(10),
            retry_backoff_cap: Duration::from_millis(40),
            failure_threshold: 3,
            reconnect_backoff: Duration::from_millis(200),
            reconnect_backoff_cap: Duration::from_secs(2),
            ..PortPolicy::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn connect_then_read() {
        let (port, tally) = port_with(fast_policy());
        assert_eq!(port.health(), ConnectionHealth::Disconnected);

        port.connect().await.unwrap();
        assert_eq!(port.health(), ConnectionHealth::Connected);

        tally.push(Step::Bytes(vec![0x91, 0x84, 0x83]));
        let bytes = port.read_range(0xD158, 3).await.unwrap();
        assert_eq!(bytes, vec![0x91, 0x84, 0x83]);
        assert_eq!(tally.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn first_read_connects_lazily() {
        let (port, tally) = port_with(fast_policy());
        port.read_range(0xD163, 1).await.unwrap();
        assert_eq!(tally.opens(), 1);
        assert_eq!(port.health(), ConnectionHealth::Connected);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_length_reply_is_a_read_error() {
        let (port, tally) = port_with(fast_policy());
        port.connect().await.unwrap();
        tally.push(Step::Bytes(vec![0x01]));

        let err = port.read_range(0xD158, 3).await.unwrap_err();
        assert_eq!(err.address, 0xD158);
        assert_eq!(err.length, 3);
        assert!(matches!(err.cause, ReadFailure::BadReply(_)));
        assert_eq!(port.health(), ConnectionHealth::Degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_reads_are_bounded_and_cross_threshold() {
        let policy = fast_policy();
        let max = policy.max_timeout;
        let threshold = policy.failure_threshold;
        let (port, tally) = port_with(policy);
        port.connect().await.unwrap();
        tally.always(Step::Hang);

        for _ in 0..=threshold {
            let started = Instant::now();
            let result = port.read_range(0xD16B, 2).await;
            assert!(result.is_err());
            assert!(started.elapsed() <= max, "read blocked past max timeout");
        }

        assert_eq!(port.health(), ConnectionHealth::Disconnected);
        assert!(port.consecutive_failures() >= threshold);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_grows_on_failure_and_relaxes_on_success() {
        let (port, tally) = port_with(fast_policy());
        port.connect().await.unwrap();
        assert_eq!(port.current_timeout().await, Duration::from_millis(100));

        tally.push(Step::Fail);
        tally.push(Step::Fail);
        let _ = port.read_range(0, 1).await;
        let _ = port.read_range(0, 1).await;
        assert_eq!(port.current_timeout().await, Duration::from_millis(400));
        assert_eq!(port.health(), ConnectionHealth::Degraded);

        port.read_range(0, 1).await.unwrap();
        assert_eq!(port.current_timeout().await, Duration::from_millis(200));
        assert_eq!(port.health(), ConnectionHealth::Connected);
        assert_eq!(port.consecutive_failures(), 0);

        port.read_range(0, 1).await.unwrap();
        port.read_range(0, 1).await.unwrap();
        assert_eq!(port.current_timeout().await, Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_within_one_call() {
        let policy = PortPolicy {
            read_attempts: 3,
            ..fast_policy()
        };
        let (port, tally) = port_with(policy);
        port.connect().await.unwrap();
        tally.push(Step::Fail);
        tally.push(Step::Fail);
        tally.push(Step::Bytes(vec![0x42]));

        let bytes = port.read_range(0xD163, 1).await.unwrap();
        assert_eq!(bytes, vec![0x42]);
        assert_eq!(tally.reads.load(Ordering::SeqCst), 3);
        assert_eq!(port.consecutive_failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_is_deferred_then_performs_fresh_handshake() {
        let (port, tally) = port_with(fast_policy());
        port.connect().await.unwrap();
        tally.push(Step::Fail);
        tally.push(Step::Fail);
        tally.push(Step::Fail);
        for _ in 0..3 {
            let _ = port.read_range(0, 1).await;
        }
        assert_eq!(port.health(), ConnectionHealth::Disconnected);
        assert_eq!(tally.opens(), 1);

        // Inside the reconnect backoff window: no handshake is attempted.
        let err = port.read_range(0, 1).await.unwrap_err();
        assert!(matches!(
            err.cause,
            ReadFailure::Connection(ConnectionError::Deferred { .. })
        ));
        assert_eq!(tally.opens(), 1);

        tokio::time::advance(Duration::from_millis(250)).await;
        port.read_range(0, 1).await.unwrap();
        assert_eq!(tally.opens(), 2);
        assert_eq!(port.health(), ConnectionHealth::Connected);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_handshakes_back_off_exponentially() {
        let (port, tally) = port_with(fast_policy());
        tally.fail_opens(true);

        let err = port.connect().await.unwrap_err();
        assert!(matches!(err, ConnectionError::Unreachable { .. }));
        assert_eq!(port.health(), ConnectionHealth::Disconnected);

        // First retry window is 200ms, the next one 400ms.
        tokio::time::advance(Duration::from_millis(201)).await;
        assert!(port.read_range(0, 1).await.is_err());
        assert_eq!(tally.opens(), 2);

        tokio::time::advance(Duration::from_millis(250)).await;
        let err = port.read_range(0, 1).await.unwrap_err();
        assert!(matches!(
            err.cause,
            ReadFailure::Connection(ConnectionError::Deferred { .. })
        ));
        assert_eq!(tally.opens(), 2);

        tally.fail_opens(false);
        tokio::time::advance(Duration::from_millis(200)).await;
        port.read_range(0, 1).await.unwrap();
        assert_eq!(tally.opens(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_serialized() {
        let (port, tally) = port_with(fast_policy());
        let port = Arc::new(port);
        port.connect().await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..8u32 {
            let port = Arc::clone(&port);
            tasks.push(tokio::spawn(async move { port.read_range(i, 1).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(tally.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_port_refuses_reads() {
        let (port, _tally) = port_with(fast_policy());
        port.connect().await.unwrap();
        port.close().await;

        let err = port.read_range(0, 1).await.unwrap_err();
        assert_eq!(err.cause, ReadFailure::Connection(ConnectionError::Closed));
        assert_eq!(port.connect().await, Err(ConnectionError::Closed));
        assert_eq!(port.health(), ConnectionHealth::Disconnected);
    }

    #[test]
    fn retry_delay_is_capped() {
        let policy = fast_policy();
        for attempt in 0..40 {
            assert!(policy.retry_delay(attempt) <= policy.retry_backoff_cap);
        }
        assert!(policy.retry_delay(0) >= policy.retry_backoff);
    }
}
