//! WakeHostUseCase: resolve a host by name and send its magic packet.
//!
//! Waking is fire-and-forget.  A successful [`WakeOutcome`] means the packet
//! was handed to the local network stack; nothing is known about whether the
//! target machine received it or powered on.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::info;
use wol_core::MacError;

use crate::application::manage_hosts::{HostError, HostRepository};

/// Error type for building and sending a magic packet.
#[derive(Debug, Error)]
pub enum WakeError {
    /// The MAC address is not 12 hex digits after removing `:` separators.
    #[error(transparent)]
    InvalidMacFormat(#[from] MacError),

    /// The target is not a usable `host:port` IPv4 UDP endpoint.
    #[error("cannot resolve wake target {target:?}: {reason}")]
    AddressResolution { target: String, reason: String },

    /// The local network stack refused the socket or the datagram.
    #[error("failed to send magic packet to {destination}: {source}")]
    Send {
        destination: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Hands a magic packet for `mac` to the network, addressed to `target`.
///
/// The production implementation sends one UDP datagram; tests mock it.
#[cfg_attr(test, mockall::automock)]
pub trait PacketSender {
    /// Builds and sends the packet, returning the resolved destination.
    fn send_magic_packet(&self, mac: &str, target: &str) -> Result<SocketAddr, WakeError>;
}

/// The result of a successful local send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeOutcome {
    /// Host name, or `None` for an ad-hoc send without a stored record.
    pub host: Option<String>,
    /// The MAC address as it was supplied.
    pub mac: String,
    /// The endpoint the datagram was sent to.
    pub destination: SocketAddr,
}

impl WakeOutcome {
    /// Status line for the user.  Deliberately says "sent", not "woken".
    pub fn status_message(&self) -> String {
        match &self.host {
            Some(name) => format!("magic packet for {name} sent to {}", self.destination),
            None => format!("magic packet sent to {}", self.destination),
        }
    }
}

impl fmt::Display for WakeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}

/// Wakes the first stored host named `name`.
///
/// # Errors
///
/// Returns [`HostError::NotFound`] when no host matches, or
/// [`HostError::Wake`] when building or sending the packet fails.
pub fn wake_host(
    repo: &HostRepository,
    sender: &dyn PacketSender,
    name: &str,
) -> Result<WakeOutcome, HostError> {
    let host = repo
        .find(name)
        .ok_or_else(|| HostError::NotFound(name.to_string()))?;

    let destination = sender.send_magic_packet(&host.mac, &host.target)?;
    info!("sent magic packet for {name} ({}) to {destination}", host.mac);

    Ok(WakeOutcome {
        host: Some(host.name.clone()),
        mac: host.mac.clone(),
        destination,
    })
}

/// Sends a magic packet for `mac` to `target` without a stored host.
///
/// # Errors
///
/// Returns [`WakeError`] when building or sending the packet fails.
pub fn wake_address(
    sender: &dyn PacketSender,
    mac: &str,
    target: &str,
) -> Result<WakeOutcome, WakeError> {
    let destination = sender.send_magic_packet(mac, target)?;
    info!("sent magic packet for {mac} to {destination}");

    Ok(WakeOutcome {
        host: None,
        mac: mac.to_string(),
        destination,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
