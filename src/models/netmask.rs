//! Subnet mask, interchangeable with a prefix length.

use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

use super::ipv4::{mask_bits, prefix_from_mask, MAX_LENGTH};

/// A contiguous high-bit subnet mask.
///
/// Stored as its prefix length, so every value is a valid mask.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Netmask {
    prefix: u8,
}

impl Netmask {
    /// Mask for `prefix`, or `None` above 32.
    pub const fn from_prefix(prefix: u8) -> Option<Netmask> {
        if prefix > MAX_LENGTH {
            None
        } else {
            Some(Netmask { prefix })
        }
    }

    /// Mask for `prefix`, capped at /32.
    pub const fn clamped(prefix: u8) -> Netmask {
        if prefix > MAX_LENGTH {
            Netmask { prefix: MAX_LENGTH }
        } else {
            Netmask { prefix }
        }
    }

    /// Parse a dotted netmask such as `255.255.255.0`.
    pub fn from_addr(addr: Ipv4Addr) -> Option<Netmask> {
        prefix_from_mask(u32::from(addr)).map(|prefix| Netmask { prefix })
    }

    /// Parse a dotted hostmask such as `0.0.0.255`.
    pub fn from_hostmask(addr: Ipv4Addr) -> Option<Netmask> {
        prefix_from_mask(!u32::from(addr)).map(|prefix| Netmask { prefix })
    }

    /// Parse a base-10 prefix length, tolerating surrounding whitespace and a sign.
    pub fn from_prefix_str(raw: &str) -> Option<Netmask> {
        let prefix: i64 = raw.trim().parse().ok()?;
        u8::try_from(prefix).ok().and_then(Netmask::from_prefix)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn bits(&self) -> u32 {
        mask_bits(self.prefix)
    }

    /// The mask in dotted-quad form.
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bits())
    }
}

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr())
    }
}

impl Serialize for Netmask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Netmask", 2)?;
        state.serialize_field("mask", &self.addr())?;
        state.serialize_field("prefix", &self.prefix)?;
        state.end()
    }
}
