//! Input validation predicates.

use crate::models::Netmask;
use std::net::{IpAddr, Ipv4Addr};

/// True if `raw` is a well-formed IPv4 or IPv6 address.
pub fn is_valid_ip(raw: &str) -> bool {
    raw.parse::<IpAddr>().is_ok()
}

/// True if `raw` is a prefix length in `0..=32`, or a dotted netmask or hostmask.
pub fn is_valid_mask_or_prefix(raw: &str) -> bool {
    parse_mask_or_prefix(raw).is_some()
}

/// Interpret `raw` as a prefix length (`"24"`), a netmask (`"255.255.255.0"`)
/// or a hostmask (`"0.0.0.255"`), in that order.
pub fn parse_mask_or_prefix(raw: &str) -> Option<Netmask> {
    if let Some(mask) = Netmask::from_prefix_str(raw) {
        return Some(mask);
    }
    let addr: Ipv4Addr = raw.parse().ok()?;
    Netmask::from_addr(addr).or_else(|| Netmask::from_hostmask(addr))
}
