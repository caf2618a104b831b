//! # wol-core
//!
//! Shared library for the Wake-on-LAN host manager containing the host record
//! entity, MAC address parsing, and the magic packet builder.
//!
//! It has zero dependencies on network sockets or the file system; everything
//! here is deterministic and can be tested without any external setup.
//!
//! # Architecture overview (for beginners)
//!
//! Wake-on-LAN (WoL) lets a sleeping or powered-down machine be switched on
//! remotely.  The network card of the sleeping machine keeps listening for a
//! specially formatted frame called a *magic packet*.  When it sees one that
//! contains its own MAC address, it tells the motherboard to power up.
//!
//! This crate (`wol-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The [`HostRecord`] entity (name, MAC, wake target) and the
//!   [`MacAddress`] value type with its parsing rules.
//!
//! - **`protocol`** – How the magic packet is laid out on the wire: six `0xFF`
//!   bytes followed by the MAC address repeated sixteen times, 102 bytes total.
//!
//! Sending the packet over UDP and persisting records live in the `wol` crate.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `wol_core::HostRecord` instead of `wol_core::domain::host::HostRecord`.
pub use domain::host::HostRecord;
pub use domain::mac::{MacAddress, MacError};
pub use protocol::magic::{build_magic_packet, MagicPacket, MAGIC_PACKET_LEN};
