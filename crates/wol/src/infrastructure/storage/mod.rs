//! Storage infrastructure: host list and configuration persistence.
//!
//! - **`hosts`** – [`hosts::FileHostStore`], the TOML host file kept in the
//!   platform data directory.  Writes go to a sibling temp file that is then
//!   renamed over the real one, so a crash never leaves a half-written list.
//! - **`memory`** – [`memory::MemoryHostStore`], a non-durable store seeded
//!   from a fixed list (the "fixed devices" configuration).
//! - **`config`** – Reading and writing `config.toml`, with defaults for
//!   every field so a first run works without any file.
//! - **`paths`** – Per-user config and data directories for each platform.

pub mod config;
pub mod hosts;
pub mod memory;
pub mod paths;
