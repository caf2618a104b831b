//! MAC address value type.
//!
//! A MAC (Media Access Control) address is the 6-byte hardware identifier
//! burned into every Ethernet network card.  Humans usually write it as twelve
//! hexadecimal digits, optionally separated by colons:
//!
//! ```text
//! 1c:69:7a:65:2d:98
//! 1C697A652D98
//! ```
//!
//! # Parsing rule
//!
//! 1. All `:` separators are removed.
//! 2. The remaining text is lower-cased.
//! 3. It must then be exactly twelve hex digits, decoded with [`hex::decode`]
//!    into 6 bytes.
//!
//! Other separators (`-`, `.`) are rejected, matching the forms accepted when
//! a host is entered.

use std::fmt;
use std::str::FromStr;

use hex::FromHexError;
use thiserror::Error;

/// Number of bytes in an Ethernet hardware address.
pub const MAC_LEN: usize = 6;

/// Error returned when a string is not a valid 6-byte MAC address.
///
/// Every variant is an "invalid MAC format" condition; the variants only differ
/// in which rule the input broke, so the status message can point at it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MacError {
    /// A character other than `0-9`, `a-f`, `A-F` or `:` was found.
    #[error("invalid MAC address {input:?}: {found:?} is not a hex digit")]
    NotHex { input: String, found: char },

    /// After removing separators the input is not exactly 12 hex digits.
    #[error("invalid MAC address {input:?}: expected 12 hex digits, got {digits}")]
    WrongLength { input: String, digits: usize },
}

/// A 6-byte Ethernet hardware address.
///
/// `Display` renders the canonical lower-case, colon-separated form
/// (`1c:69:7a:65:2d:98`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; MAC_LEN]);

impl MacAddress {
    /// Wraps raw bytes.
    pub const fn new(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses `input` using the rule described in the module documentation.
    ///
    /// # Errors
    ///
    /// Returns [`MacError::NotHex`] when a non-hex character is present and
    /// [`MacError::WrongLength`] when the digit count is not 12.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wol_core::MacAddress;
    ///
    /// let mac = MacAddress::parse("1C:69:7a:65:2D:98").unwrap();
    /// assert_eq!(mac.octets(), [0x1c, 0x69, 0x7a, 0x65, 0x2d, 0x98]);
    /// assert!(MacAddress::parse("zz:69:7a:65:2d:98").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, MacError> {
        let normalized: String = input
            .chars()
            .filter(|&c| c != ':')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let decoded = hex::decode(&normalized).map_err(|e| {
            // `hex` reports odd length before bad characters and names the
            // offending byte, not char; report the first non-hex char instead.
            let bad_char = normalized.chars().find(|c| !c.is_ascii_hexdigit());
            match (e, bad_char) {
                (_, Some(found)) => MacError::NotHex {
                    input: input.to_string(),
                    found,
                },
                (FromHexError::InvalidHexCharacter { c, .. }, None) => MacError::NotHex {
                    input: input.to_string(),
                    found: c,
                },
                (_, None) => MacError::WrongLength {
                    input: input.to_string(),
                    digits: normalized.chars().count(),
                },
            }
        })?;

        let bytes = <[u8; MAC_LEN]>::try_from(decoded).map_err(|v| MacError::WrongLength {
            input: input.to_string(),
            digits: v.len() * 2,
        })?;
        Ok(Self(bytes))
    }

    /// Returns the six address bytes.
    pub const fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = MacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
