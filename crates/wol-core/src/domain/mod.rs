//! Domain entities for the Wake-on-LAN host manager.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application is called the **domain**.  Domain
//! code holds the core rules (what a host record is, what a valid MAC address
//! looks like) and never imports OS APIs, sockets, or file-system code.  Outer
//! layers depend on the domain, never the other way round, which keeps these
//! rules trivially unit-testable.

/// Stored name/MAC/endpoint triples and ordered-list helpers.
pub mod host;

/// 6-byte hardware addresses and their textual parsing rules.
pub mod mac;
