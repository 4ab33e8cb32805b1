//! Error taxonomy of the synchronization engine.
//!
//! - [`TransportError`] is what a [`MemoryTransport`] reports for one
//!   exchange with the remote process.
//! - [`ConnectionError`] means the link itself is unusable (unreachable,
//!   handshake rejected, or reconnect deferred by backoff). Recovered by
//!   the port's reconnect loop.
//! - [`ReadError`] means one range could not be read. Recovered by retry
//!   inside the port or by stale-value fallback in the orchestrator; it
//!   never escapes the orchestrator.
//!
//! Unknown codes in otherwise valid data are not errors at all: the
//! schema decoder maps them to placeholder values.
//!
//! [`MemoryTransport`]: crate::transport::MemoryTransport

use std::time::Duration;

/// Failure of a single exchange on the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No matching reply arrived within the allotted time.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The socket reported an I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reply could not be parsed or had the wrong length.
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// The remote process answered with an explicit error.
    #[error("remote rejected request: {0}")]
    Remote(String),

    /// The transport is not open.
    #[error("transport is not open")]
    NotOpen,
}

/// The link to the remote process is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The endpoint could not be reached.
    #[error("remote process unreachable at {endpoint}: {reason}")]
    Unreachable {
        /// `host:port` of the remote process.
        endpoint: String,
        /// Underlying cause.
        reason: String,
    },

    /// The endpoint answered but the handshake failed.
    #[error("handshake with {endpoint} failed: {reason}")]
    Handshake {
        /// `host:port` of the remote process.
        endpoint: String,
        /// Underlying cause.
        reason: String,
    },

    /// A reconnect was attempted too soon after the previous failure.
    #[error("reconnect deferred for another {}ms", .remaining.as_millis())]
    Deferred {
        /// Time left until the next reconnect attempt is allowed.
        remaining: Duration,
    },

    /// The port has been closed for shutdown.
    #[error("port is closed")]
    Closed,
}

/// Why a range read failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadFailure {
    /// Every attempt timed out.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The reply was malformed, had the wrong length, or was rejected.
    #[error("bad reply: {0}")]
    BadReply(String),

    /// The socket failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The port could not (re)establish the connection.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// A single range read failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("read of {length} bytes at {address:#06X} failed: {cause}")]
pub struct ReadError {
    /// Requested start address.
    pub address: u32,
    /// Requested length.
    pub length: usize,
    /// What went wrong.
    pub cause: ReadFailure,
}

impl ReadError {
    /// Create a read error for the given range.
    pub const fn new(address: u32, length: usize, cause: ReadFailure) -> Self {
        Self {
            address,
            length,
            cause,
        }
    }
}

impl From<TransportError> for ReadFailure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(waited) => Self::Timeout(waited),
            TransportError::Malformed(msg) | TransportError::Remote(msg) => Self::BadReply(msg),
            TransportError::Io(e) => Self::Transport(e.to_string()),
            TransportError::NotOpen => Self::Transport(String::from("transport is not open")),
        }
    }
}
