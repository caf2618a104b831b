//! UDP magic packet sender.
//!
//! [`UdpWaker`] is the production [`PacketSender`].  For every call it:
//!
//! 1. Builds the 102-byte magic packet (fails fast on a malformed MAC).
//! 2. Resolves the `host:port` target to an IPv4 socket address.
//! 3. Binds a fresh UDP socket to an ephemeral local port with `SO_BROADCAST`
//!    enabled, so subnet broadcast targets like `192.168.4.255:9` are allowed.
//! 4. Sends the packet in one `send_to` and drops the socket.
//!
//! # Why UDP? (for beginners)
//!
//! The sleeping machine has no IP stack running, so there is nothing to
//! connect to.  Its network card only inspects raw frames.  A UDP datagram
//! sent to the broadcast address reaches every card on the subnet, and the
//! one whose MAC appears sixteen times in the payload powers up.  No reply is
//! ever sent, so there is nothing to wait for.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::debug;
use wol_core::{build_magic_packet, MAGIC_PACKET_LEN};

use crate::application::wake_host::{PacketSender, WakeError};

/// Local address used when none is configured: any interface, ephemeral port.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:0";

/// Sends magic packets as single UDP datagrams.
#[derive(Debug, Clone)]
pub struct UdpWaker {
    bind_addr: SocketAddr,
}

impl UdpWaker {
    /// Creates a waker that binds its sockets to `bind_addr`.
    ///
    /// Use port `0` to let the OS pick an ephemeral port.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Returns the local address sockets are bound to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl Default for UdpWaker {
    fn default() -> Self {
        Self::new(SocketAddr::from(([0, 0, 0, 0], 0)))
    }
}

impl PacketSender for UdpWaker {
    fn send_magic_packet(&self, mac: &str, target: &str) -> Result<SocketAddr, WakeError> {
        let packet = build_magic_packet(mac)?;
        let destination = resolve_target(target)?;

        let send_err = |source| WakeError::Send {
            destination,
            source,
        };

        // The socket is closed when it goes out of scope, on every path.
        let socket = UdpSocket::bind(self.bind_addr).map_err(send_err)?;
        socket.set_broadcast(true).map_err(send_err)?;

        let sent = socket.send_to(&packet, destination).map_err(send_err)?;
        if sent != MAGIC_PACKET_LEN {
            return Err(send_err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("short write: {sent} of {MAGIC_PACKET_LEN} bytes"),
            )));
        }

        debug!("sent {sent}-byte magic packet to {destination} from {}", self.bind_addr);
        Ok(destination)
    }
}

/// Sends a magic packet for `mac` to `target` from an ephemeral local port.
///
/// # Errors
///
/// - [`WakeError::InvalidMacFormat`] if `mac` is malformed.
/// - [`WakeError::AddressResolution`] if `target` is not a `host:port` pair
///   with an IPv4 address.
/// - [`WakeError::Send`] if the socket cannot be opened or the write fails.
pub fn send_magic_packet(mac: &str, target: &str) -> Result<SocketAddr, WakeError> {
    UdpWaker::default().send_magic_packet(mac, target)
}

/// Resolves `target` to the first IPv4 socket address it names.
///
/// # Errors
///
/// Returns [`WakeError::AddressResolution`] if the string is not a valid
/// `host:port` pair, the host lookup fails, or only IPv6 addresses result.
pub fn resolve_target(target: &str) -> Result<SocketAddr, WakeError> {
    let resolution_err = |reason: String| WakeError::AddressResolution {
        target: target.to_string(),
        reason,
    };

    target
        .to_socket_addrs()
        .map_err(|e| resolution_err(e.to_string()))?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| resolution_err("no IPv4 address found".to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
