//! Error types reported by the subnet helper.

use serde::Serialize;
use thiserror::Error;

/// User input that could not be used, even after repair.
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("malformed address {raw:?}: octet {token:?} is not a number")]
    MalformedAddress { raw: String, token: String },
    #[error("invalid subnet count {0:?}: expected a whole number")]
    InvalidCount(String),
}

/// Failure to subdivide a network.
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    #[error(
        "requested {requested} subnet(s) needs a /{new_prefix} prefix, which exceeds the available address space"
    )]
    AddressSpaceExceeded { requested: i64, new_prefix: u32 },
    #[error("prefix length /{0} is longer than 32 bits")]
    InvalidPrefix(u8),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
}
