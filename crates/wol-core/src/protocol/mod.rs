//! Protocol module containing the magic packet wire format.

pub mod magic;

pub use magic::{build_magic_packet, parse_magic_packet, MagicPacket, MAGIC_PACKET_LEN};
