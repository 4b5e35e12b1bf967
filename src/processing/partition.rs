//! Binary subdivision of a network into equally sized subnets.
//!
//! A network can only be split at prefix boundaries, so a request for `n`
//! subnets is rounded up to the next power of two and the prefix grows by
//! `log2` of that count.

use crate::models::{hosts_per_subnet, Network, PartitionError, MAX_LENGTH};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::iter::FusedIterator;
use std::net::Ipv4Addr;

/// Number of extra prefix bits needed to hold `count` subnets (`ceil(log2(count))`).
///
/// Counts of 0 and 1 need no extra bits.
pub fn extra_prefix_bits(count: u64) -> u32 {
    u64::BITS - count.saturating_sub(1).leading_zeros()
}

/// Smallest power of two that is `>= requested`, with a floor of 1.
///
/// Zero and negative requests are treated as a request for one subnet.
pub fn subdivision_count(requested: i64) -> u64 {
    // requested <= i64::MAX, so the shift is at most 63.
    1u64 << extra_prefix_bits(requested.max(1).unsigned_abs())
}

/// Result of [`partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionResult {
    parent: Network,
    requested: i64,
    actual_count: u64,
    new_prefix: u8,
    explanation: String,
}

impl PartitionResult {
    /// The network that was split, host bits cleared.
    pub fn parent(&self) -> Network {
        self.parent
    }

    pub fn requested(&self) -> i64 {
        self.requested
    }

    /// Number of subnets delivered, always a power of two.
    pub fn actual_count(&self) -> u64 {
        self.actual_count
    }

    pub fn new_prefix(&self) -> u8 {
        self.new_prefix
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Usable hosts in each child subnet.
    pub fn hosts_per_subnet(&self) -> u64 {
        hosts_per_subnet(self.new_prefix)
    }

    /// The child networks in ascending address order.
    pub fn subnets(&self) -> Subnets {
        Subnets {
            start: u64::from(u32::from(self.parent.addr())),
            step: 1u64 << (MAX_LENGTH - self.new_prefix),
            prefix: self.new_prefix,
            front: 0,
            back: self.actual_count,
        }
    }
}

impl Serialize for PartitionResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PartitionResult", 7)?;
        state.serialize_field("parent", &self.parent)?;
        state.serialize_field("requested", &self.requested)?;
        state.serialize_field("actual_count", &self.actual_count)?;
        state.serialize_field("new_prefix", &self.new_prefix)?;
        state.serialize_field("hosts_per_subnet", &self.hosts_per_subnet())?;
        state.serialize_field("explanation", &self.explanation)?;
        state.serialize_field("subnets", &self.subnets())?;
        state.end()
    }
}

/// Lazily generated child networks of a [`PartitionResult`].
#[derive(Debug, Clone)]
pub struct Subnets {
    start: u64,
    step: u64,
    prefix: u8,
    front: u64,
    back: u64,
}

impl Subnets {
    fn network_at(&self, index: u64) -> Network {
        // index < actual_count keeps the address inside the parent, so it fits in u32.
        let addr = self.start + index * self.step;
        Network::from_masked(Ipv4Addr::from(addr as u32), self.prefix)
    }
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        if self.front >= self.back {
            return None;
        }
        let net = self.network_at(self.front);
        self.front += 1;
        Some(net)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Network> {
        self.front = self.front.saturating_add(n as u64).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Subnets {
    fn next_back(&mut self) -> Option<Network> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.network_at(self.back))
    }
}

impl ExactSizeIterator for Subnets {}

impl FusedIterator for Subnets {}

impl Serialize for Subnets {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.clone())
    }
}

/// Split the network `base/original_prefix` into at least `requested_count`
/// equally sized, non-overlapping subnets.
///
/// # Arguments
/// * `base` - Any address in the network; host bits are ignored
/// * `original_prefix` - Prefix length of the network being split
/// * `requested_count` - Desired number of subnets; values below 1 count as 1
///
/// # Returns
/// A [`PartitionResult`] with `actual_count` rounded up to a power of two,
/// or [`PartitionError::AddressSpaceExceeded`] when the new prefix would be
/// longer than 32 bits.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use subnet_helper::processing::partition;
/// let result = partition(Ipv4Addr::new(10, 0, 0, 0), 8, 5).unwrap();
/// assert_eq!(result.actual_count(), 8);
/// assert_eq!(result.subnets().next().unwrap().to_string(), "10.0.0.0/11");
/// ```
pub fn partition(
    base: Ipv4Addr,
    original_prefix: u8,
    requested_count: i64,
) -> Result<PartitionResult, PartitionError> {
    let parent = Network::new(base, original_prefix)
        .map_err(|_| PartitionError::InvalidPrefix(original_prefix))?;

    let actual_count = subdivision_count(requested_count);
    let new_prefix = u32::from(original_prefix) + extra_prefix_bits(actual_count);
    if new_prefix > u32::from(MAX_LENGTH) {
        log::debug!("partition({parent}, {requested_count}) needs /{new_prefix}");
        return Err(PartitionError::AddressSpaceExceeded {
            requested: requested_count,
            new_prefix,
        });
    }
    let new_prefix = new_prefix as u8;

    let explanation = format!(
        "Requested {requested_count} subnet(s); due to binary subdivision, generated {actual_count} non-overlapping subnets."
    );
    log::debug!("partition({parent}) into {actual_count} x /{new_prefix}");

    Ok(PartitionResult {
        parent,
        requested: requested_count,
        actual_count,
        new_prefix,
        explanation,
    })
}
