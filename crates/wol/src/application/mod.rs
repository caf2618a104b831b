//! Application layer use cases for the host manager.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `wol-core`) and the infrastructure (sockets, files).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "wake the
//!   host called `nas`").
//! - **Depend on abstractions** (the [`manage_hosts::HostStore`] and
//!   [`wake_host::PacketSender`] traits) rather than concrete implementations,
//!   so storage and networking can be swapped or mocked.
//! - **Contain no socket calls and no file-system access**.
//!
//! # Sub-modules
//!
//! - **`manage_hosts`** – Owns the ordered host list, persists it after every
//!   mutation, and validates user input for new hosts.
//!
//! - **`wake_host`** – Looks a host up by name and hands its MAC and target to
//!   the packet sender.

pub mod manage_hosts;
pub mod wake_host;
