//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Network`] for representing an IPv4 network (base address plus
//! prefix length), along with the mask arithmetic the rest of the crate is
//! built on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::Netmask;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Mask bits for a prefix length already known to be `<= MAX_LENGTH`.
pub(crate) fn mask_bits(len: u8) -> u32 {
    u32::MAX
        .checked_shl(u32::from(MAX_LENGTH - len))
        .unwrap_or(0)
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_helper::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        Ok(mask_bits(len))
    }
}

/// Convert a subnet mask back to its prefix length.
///
/// Returns `None` when the 1-bits are not contiguous from the top.
pub fn prefix_from_mask(mask: u32) -> Option<u8> {
    let ones = mask.leading_ones() as u8;
    (mask_bits(ones) == mask).then_some(ones)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(cidr)?;
    let subnet_size = 1u64 << (MAX_LENGTH - cidr);
    let network_bits = u64::from(u32::from(addr) & mask);
    let next_subnet_bits = u32::try_from(network_bits + subnet_size)
        .map_err(|_| "Next subnet calculation overflowed")?;
    Ok(Ipv4Addr::from(next_subnet_bits))
}

/// Number of usable host addresses in a network of the given prefix length.
///
/// Network and broadcast addresses are not usable, so /31 and /32 report 0.
pub fn hosts_per_subnet(len: u8) -> u64 {
    let len = len.min(MAX_LENGTH);
    (1u64 << (MAX_LENGTH - len)).saturating_sub(2)
}

/// IPv4 network in CIDR notation.
///
/// Host bits of `addr` below the prefix are always zero.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_cidr(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Network {
    /// Create a network, masking off any host bits of `addr`.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Network, Box<dyn Error>> {
        let addr = cut_addr(addr, prefix)?;
        Ok(Network { addr, prefix })
    }

    /// Caller guarantees `prefix <= MAX_LENGTH` and that `addr` has no host bits.
    pub(crate) const fn from_masked(addr: Ipv4Addr, prefix: u8) -> Network {
        Network { addr, prefix }
    }

    /// Create a [`Network`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn from_cidr(addr_cidr: &str) -> Result<Network, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let (addr, prefix) = addr_cidr
            .split_once('/')
            .ok_or_else(|| format!("Invalid address/prefix {addr_cidr}"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr}"))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| format!("Invalid prefix length {prefix}"))?;
        Network::new(addr, prefix)
    }

    /// Base address of the network.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn netmask(&self) -> Netmask {
        Netmask::clamped(self.prefix)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !mask_bits(self.prefix))
    }

    /// Total number of addresses covered, including network and broadcast.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    /// Usable host addresses, see [`hosts_per_subnet`].
    pub fn hosts(&self) -> u64 {
        hosts_per_subnet(self.prefix)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }
}

impl FromStr for Network {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::from_cidr(s)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
