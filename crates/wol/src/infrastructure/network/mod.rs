//! Network infrastructure for the host manager.
//!
//! # Sub-modules
//!
//! - **`waker`** – Resolves a `host:port` target and sends the 102-byte magic
//!   packet as a single UDP datagram from an ephemeral local port.

pub mod waker;
