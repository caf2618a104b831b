//! Infrastructure layer for the host manager.
//!
//! Contains OS-facing adapters: the UDP magic packet sender, file-system
//! storage for hosts and configuration, and the command bridge used by the
//! CLI front end.
//!
//! **Dependency rule**: this layer may depend on `application` and `wol_core`,
//! but MUST NOT be imported by the `application` or domain layers.

pub mod network;
pub mod storage;
pub mod ui_bridge;
