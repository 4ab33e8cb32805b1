//! Wire access to the remote process.
//!
//! [`MemoryTransport`] is the seam between the port's retry/backoff state
//! machine and the bytes on the wire. [`RetroArchTransport`] speaks the
//! emulator's UDP network command interface; tests substitute scripted
//! transports.
//!
//! # Protocol
//!
//! | Request | Reply |
//! |---------|-------|
//! | `VERSION` | `1.19.1` |
//! | `READ_CORE_MEMORY d158 3` | `READ_CORE_MEMORY d158 91 84 83` |
//! | (failure) | `READ_CORE_MEMORY d158 -1 no memory map defined` |
//!
//! Requests and replies are single datagrams. Replies to earlier requests
//! that timed out can still arrive late, so a reply is only accepted when
//! its echoed address matches the outstanding request.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use tokio::net::UdpSocket;
use tracing::{debug, trace};

use crate::error::TransportError;

/// Command that reads a range of core memory.
const READ_COMMAND: &str = "READ_CORE_MEMORY";

/// Command sent to check that the remote answers the handshake.
const VERSION_COMMAND: &str = "VERSION";

/// Datagram headroom beyond the hex payload (command echo and address).
const REPLY_HEADROOM: usize = 64;

/// Which platform's address space the remote process is inspected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Platform {
    /// Original Game Boy: 16-bit address space.
    #[serde(rename = "GB")]
    GameBoy,
    /// Game Boy Color: 16-bit address space.
    #[serde(rename = "GBC")]
    GameBoyColor,
    /// Game Boy Advance: 28-bit bus.
    #[serde(rename = "GBA")]
    GameBoyAdvance,
}

impl Platform {
    /// Highest valid address on this platform.
    pub const fn max_address(self) -> u32 {
        match self {
            Self::GameBoy | Self::GameBoyColor => 0xFFFF,
            Self::GameBoyAdvance => 0x0FFF_FFFF,
        }
    }

    /// Short platform tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameBoy => "GB",
            Self::GameBoyColor => "GBC",
            Self::GameBoyAdvance => "GBA",
        }
    }

    /// Reject empty ranges and ranges that leave the address space.
    pub fn check_range(self, address: u32, length: usize) -> Result<(), TransportError> {
        let span = u32::try_from(length)
            .ok()
            .and_then(|len| len.checked_sub(1))
            .ok_or_else(|| TransportError::Malformed(format!("invalid read length {length}")))?;
        match address.checked_add(span) {
            Some(end) if end <= self.max_address() => Ok(()),
            _ => Err(TransportError::Malformed(format!(
                "range {address:#X}+{length} outside {} address space",
                self.as_str()
            ))),
        }
    }
}

impl core::fmt::Display for Platform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request/response channel to the remote process.
///
/// The port owns exactly one transport and never issues overlapping
/// calls, so implementations need not be pipelined. The port also wraps
/// every call in its own timeout; the `timeout` argument is a hint for
/// implementations that can stop waiting early.
pub trait MemoryTransport: Send {
    /// Open the channel and perform the handshake for `platform`.
    fn open(
        &mut self,
        platform: Platform,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Read exactly `length` bytes at `address`.
    fn read(
        &mut self,
        address: u32,
        length: usize,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;

    /// Release the channel. Idempotent.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// `host:port` of the remote process, for diagnostics.
    fn endpoint(&self) -> String;
}

/// UDP transport for the emulator's network command interface.
#[derive(Debug)]
pub struct RetroArchTransport {
    host: String,
    port: u16,
    platform: Platform,
    socket: Option<UdpSocket>,
}

impl RetroArchTransport {
    /// Create a closed transport targeting `host:port`.
    pub const fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            platform: Platform::GameBoy,
            socket: None,
        }
    }

    /// Whether a socket is currently open.
    pub const fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    async fn resolve(&self) -> Result<SocketAddr, TransportError> {
        let endpoint = self.endpoint();
        tokio::net::lookup_host(endpoint.as_str())
            .await?
            .next()
            .ok_or_else(|| TransportError::Malformed(format!("{endpoint} did not resolve")))
    }

    /// Receive datagrams until one answers the read at `address`.
    async fn await_read_reply(
        socket: &UdpSocket,
        address: u32,
        length: usize,
    ) -> Result<Vec<u8>, TransportError> {
        let capacity = length
            .saturating_mul(3)
            .saturating_add(REPLY_HEADROOM);
        let mut buf = vec![0u8; capacity];
        loop {
            let n = socket.recv(&mut buf).await?;
            let reply = String::from_utf8_lossy(buf.get(..n).unwrap_or_default());
            match parse_read_reply(&reply, address, length)? {
                Some(bytes) => return Ok(bytes),
                None => trace!(reply = %reply.trim_end(), "discarding stale reply"),
            }
        }
    }
}

impl MemoryTransport for RetroArchTransport {
    async fn open(&mut self, platform: Platform, timeout: Duration) -> Result<(), TransportError> {
        self.socket = None;
        let remote = self.resolve().await?;
        let local: SocketAddr = if remote.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(remote).await?;

        socket.send(format!("{VERSION_COMMAND}\n").as_bytes()).await?;
        let mut buf = vec![0u8; REPLY_HEADROOM];
        let n = tokio::time::timeout(timeout, socket.recv(&mut buf))
            .await
            .map_err(|_elapsed| TransportError::Timeout(timeout))??;
        let version = String::from_utf8_lossy(buf.get(..n).unwrap_or_default())
            .trim()
            .to_owned();
        if !looks_like_version(&version) {
            return Err(TransportError::Malformed(format!(
                "unexpected handshake reply {version:?}"
            )));
        }

        debug!(%remote, %version, platform = %platform, "remote command interface answered");
        self.platform = platform;
        self.socket = Some(socket);
        Ok(())
    }

    async fn read(
        &mut self,
        address: u32,
        length: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, TransportError> {
        self.platform.check_range(address, length)?;
        let socket = self.socket.as_ref().ok_or(TransportError::NotOpen)?;

        socket
            .send(format!("{READ_COMMAND} {address:x} {length}\n").as_bytes())
            .await?;
        tokio::time::timeout(timeout, Self::await_read_reply(socket, address, length))
            .await
            .map_err(|_elapsed| TransportError::Timeout(timeout))?
    }

    async fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!(endpoint = %self.endpoint(), "transport closed");
        }
    }

    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A version reply is a dotted run of digits, e.g. `1.19.1`.
fn looks_like_version(reply: &str) -> bool {
    !reply.is_empty()
        && reply.chars().all(|c| c.is_ascii_digit() || c == '.')
        && reply.chars().any(|c| c.is_ascii_digit())
}

/// Parse a `READ_CORE_MEMORY` reply.
///
/// Returns `Ok(None)` when the reply answers a different address (a late
/// reply to an earlier request), `Ok(Some(bytes))` for a matching reply of
/// the expected length, and an error for anything else.
pub fn parse_read_reply(
    reply: &str,
    address: u32,
    length: usize,
) -> Result<Option<Vec<u8>>, TransportError> {
    let mut tokens = reply.split_whitespace();
    if tokens.next() != Some(READ_COMMAND) {
        return Err(TransportError::Malformed(format!(
            "unexpected reply {:?}",
            reply.trim_end()
        )));
    }

    let echoed = tokens
        .next()
        .and_then(parse_hex_address)
        .ok_or_else(|| TransportError::Malformed(String::from("missing address echo")))?;
    if echoed != address {
        return Ok(None);
    }

    let mut payload = tokens.peekable();
    if payload.peek() == Some(&"-1") {
        let reason = payload.skip(1).collect::<Vec<_>>().join(" ");
        return Err(TransportError::Remote(if reason.is_empty() {
            String::from("read refused")
        } else {
            reason
        }));
    }

    let bytes = payload
        .map(|tok| u8::from_str_radix(tok, 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| TransportError::Malformed(format!("bad hex byte: {e}")))?;
    if bytes.len() != length {
        return Err(TransportError::Malformed(format!(
            "expected {length} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Some(bytes))
}

fn parse_hex_address(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_reply() {
        let bytes = parse_read_reply("READ_CORE_MEMORY d158 91 84 83\n", 0xD158, 3).unwrap();
        assert_eq!(bytes, Some(vec![0x91, 0x84, 0x83]));
    }

    #[test]
    fn accepts_prefixed_uppercase_address() {
        let bytes = parse_read_reply("READ_CORE_MEMORY 0xD163 03", 0xD163, 1).unwrap();
        assert_eq!(bytes, Some(vec![0x03]));
    }

    #[test]
    fn stale_reply_for_other_address_is_skipped() {
        let bytes = parse_read_reply("READ_CORE_MEMORY d163 03", 0xD158, 1).unwrap();
        assert_eq!(bytes, None);
    }

    #[test]
    fn remote_refusal_is_reported() {
        let err = parse_read_reply("READ_CORE_MEMORY d158 -1 no memory map defined", 0xD158, 3)
            .unwrap_err();
        assert!(matches!(err, TransportError::Remote(ref r) if r == "no memory map defined"));
    }

    #[test]
    fn wrong_length_is_malformed() {
        let err = parse_read_reply("READ_CORE_MEMORY d158 91 84", 0xD158, 3).unwrap_err();
        assert!(matches!(err, TransportError::Malformed(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(parse_read_reply("GET_STATUS PAUSED", 0xD158, 1).is_err());
        assert!(parse_read_reply("READ_CORE_MEMORY d158 zz", 0xD158, 1).is_err());
    }

    #[test]
    fn platform_bounds_reads() {
        assert!(Platform::GameBoy.check_range(0xFFFF, 1).is_ok());
        assert!(Platform::GameBoy.check_range(0xFFFF, 2).is_err());
        assert!(Platform::GameBoy.check_range(0xD158, 0).is_err());
        assert!(Platform::GameBoyAdvance.check_range(0x0200_0000, 256).is_ok());
    }

    #[test]
    fn version_request_shape() {
        assert!(looks_like_version("1.19.1"));
        assert!(!looks_like_version(""));
        assert!(!looks_like_version("..."));
        assert!(!looks_like_version("READ_CORE_MEMORY"));
    }

    #[tokio::test]
    async fn round_trips_against_local_responder() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = responder.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let mut buf = [0u8; 128];
            // Handshake.
            let (_, peer) = responder.recv_from(&mut buf).await.unwrap();
            responder.send_to(b"1.19.1\n", peer).await.unwrap();
            // Read: answer with a stale reply first, then the real one.
            let (_, peer) = responder.recv_from(&mut buf).await.unwrap();
            responder
                .send_to(b"READ_CORE_MEMORY d000 00\n", peer)
                .await
                .unwrap();
            responder
                .send_to(b"READ_CORE_MEMORY d163 02\n", peer)
                .await
                .unwrap();
        });

        let mut transport = RetroArchTransport::new(String::from("127.0.0.1"), port);
        transport
            .open(Platform::GameBoy, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(transport.is_open());
        let bytes = transport
            .read(0xD163, 1, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x02]);

        transport.close().await;
        assert!(!transport.is_open());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn read_before_open_fails() {
        let mut transport = RetroArchTransport::new(String::from("127.0.0.1"), 9);
        let err = transport
            .read(0xD163, 1, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::NotOpen));
    }
}
