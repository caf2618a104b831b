//! Host records and ordered host-list operations.
//!
//! A [`HostRecord`] is one wakeable machine: a display name, the MAC address
//! exactly as the user typed it, and the UDP endpoint the magic packet should
//! be sent to (usually the subnet broadcast address on port 9).
//!
//! The MAC and target are stored as strings rather than parsed types so that
//! they round-trip through storage verbatim, including the user's case and
//! separator style.  They are parsed only when a packet is actually built.
//!
//! The free functions at the bottom operate on an ordered `Vec<HostRecord>`.
//! Order is insertion order and only matters for stable listing.  Names are
//! not required to be unique; lookups resolve to the first match.

use serde::{Deserialize, Serialize};

use crate::domain::mac::{MacAddress, MacError};

/// A stored name/MAC/endpoint triple representing one wakeable machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Display identifier shown in host listings.
    pub name: String,
    /// Hardware address as entered, e.g. `"1c:69:7a:65:2d:98"`.
    pub mac: String,
    /// UDP endpoint as entered, e.g. `"192.168.4.255:9"`.
    pub target: String,
}

impl HostRecord {
    pub fn new(
        name: impl Into<String>,
        mac: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mac: mac.into(),
            target: target.into(),
        }
    }

    /// Parses the stored MAC string.
    ///
    /// # Errors
    ///
    /// Returns [`MacError`] if the stored text is not a valid 6-byte address.
    pub fn mac_address(&self) -> Result<MacAddress, MacError> {
        MacAddress::parse(&self.mac)
    }
}

/// Appends `record` to the end of `records`.
///
/// Duplicate names are accepted; rejecting them is up to the caller.
pub fn add_host(records: &mut Vec<HostRecord>, record: HostRecord) {
    records.push(record);
}

/// Removes the first record whose name equals `name` exactly.
///
/// Returns the removed record, or `None` (leaving `records` untouched) if no
/// record matched.
pub fn remove_host(records: &mut Vec<HostRecord>, name: &str) -> Option<HostRecord> {
    let index = records.iter().position(|r| r.name == name)?;
    Some(records.remove(index))
}

/// Returns the first record whose name equals `name` exactly.
pub fn find_host<'a>(records: &'a [HostRecord], name: &str) -> Option<&'a HostRecord> {
    records.iter().find(|r| r.name == name)
}
