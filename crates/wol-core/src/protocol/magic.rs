//! Builder and parser for the Wake-on-LAN magic packet.
//!
//! Wire format:
//! ```text
//! [sync:6 = FF FF FF FF FF FF][mac:6] x 16
//! ```
//! Total size: 102 bytes.  No header, no separators, no trailing data.
//!
//! The packet is normally carried as the payload of a UDP datagram sent to the
//! subnet broadcast address.  The receiving network card does not care about
//! the UDP port; it scans every frame for the sync stream followed by sixteen
//! copies of its own address.

use tracing::trace;

use crate::domain::mac::{MacAddress, MacError, MAC_LEN};

/// Length of the leading `0xFF` synchronisation stream.
pub const SYNC_LEN: usize = 6;

/// Number of times the target MAC address is repeated after the sync stream.
pub const MAC_REPETITIONS: usize = 16;

/// Total size of a magic packet in bytes.
pub const MAGIC_PACKET_LEN: usize = SYNC_LEN + MAC_REPETITIONS * MAC_LEN;

/// A fully assembled magic packet.
pub type MagicPacket = [u8; MAGIC_PACKET_LEN];

/// Parses `mac` and builds the magic packet that wakes it.
///
/// # Errors
///
/// Returns [`MacError`] if `mac` is not 12 hex digits once `:` separators are
/// removed.
///
/// # Examples
///
/// ```rust
/// use wol_core::{build_magic_packet, MAGIC_PACKET_LEN};
///
/// let packet = build_magic_packet("1c:69:7a:65:2d:98").unwrap();
/// assert_eq!(packet.len(), MAGIC_PACKET_LEN);
/// assert_eq!(&packet[..6], &[0xFF; 6]);
/// assert_eq!(&packet[6..12], &[0x1c, 0x69, 0x7a, 0x65, 0x2d, 0x98]);
/// ```
pub fn build_magic_packet(mac: &str) -> Result<MagicPacket, MacError> {
    let address = MacAddress::parse(mac)?;
    Ok(magic_packet_for(&address))
}

/// Builds the magic packet for an already-parsed address.
pub fn magic_packet_for(mac: &MacAddress) -> MagicPacket {
    let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
    let octets = mac.octets();
    for chunk in packet[SYNC_LEN..].chunks_exact_mut(MAC_LEN) {
        chunk.copy_from_slice(&octets);
    }
    trace!("built magic packet for {mac}");
    packet
}

/// Recognises a magic packet and returns the address it targets.
///
/// Returns `None` unless `bytes` is exactly [`MAGIC_PACKET_LEN`] long, starts
/// with the sync stream, and repeats the same address sixteen times.
pub fn parse_magic_packet(bytes: &[u8]) -> Option<MacAddress> {
    if bytes.len() != MAGIC_PACKET_LEN || bytes[..SYNC_LEN] != [0xFF; SYNC_LEN] {
        return None;
    }

    let mut repetitions = bytes[SYNC_LEN..].chunks_exact(MAC_LEN);
    let first = repetitions.next()?;
    if !repetitions.all(|chunk| chunk == first) {
        return None;
    }

    let mut octets = [0u8; MAC_LEN];
    octets.copy_from_slice(first);
    Some(MacAddress::new(octets))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
