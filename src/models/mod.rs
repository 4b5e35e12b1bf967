//! Domain models for the subnet helper.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Network`] - IPv4 network in CIDR notation
//! - [`Netmask`] - subnet mask, convertible to and from a prefix length
//! - [`Repaired`] - a value together with whether it had to be substituted
//! - [`InputError`] and [`PartitionError`] - typed failures

mod error;
mod ipv4;
mod netmask;
mod repaired;

// Re-export public types
pub use error::{InputError, PartitionError, SubnetError};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, hosts_per_subnet, ip_after_subnet, prefix_from_mask,
    Network, MAX_LENGTH,
};
pub use netmask::Netmask;
pub use repaired::Repaired;
