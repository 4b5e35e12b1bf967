//! Address processing logic.
//!
//! This module contains the pure computations behind the helper:
//! - [`repair`] - Coercing malformed addresses and masks into valid ones
//! - [`validate`] - Predicates for address and mask input
//! - [`partition`] - Binary subdivision of a network into subnets

mod partition;
mod repair;
mod validate;

// Re-export public functions
pub use partition::{
    extra_prefix_bits, partition, subdivision_count, PartitionResult, Subnets,
};
pub use repair::{repair_address, repair_mask, FALLBACK_ADDRESS, FALLBACK_PREFIX};
pub use validate::{is_valid_ip, is_valid_mask_or_prefix, parse_mask_or_prefix};
