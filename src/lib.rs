//! Repair IPv4 address and mask input, and split a network into equally
//! sized subnets.
//!
//! The [`plan`] function runs the whole workflow; the individual steps are
//! exposed so an interactive front end can report after each input.

pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use models::{InputError, Netmask, Network, PartitionError, Repaired, SubnetError};
use processing::{
    is_valid_ip, parse_mask_or_prefix, partition, repair_address, repair_mask, PartitionResult,
};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Use `raw` as an IPv4 address if it is one, otherwise repair it.
///
/// A valid IPv6 address is reported as valid by
/// [`is_valid_ip`](processing::is_valid_ip) but cannot be subnetted here, so it
/// is repaired like any other non-IPv4 input.
pub fn resolve_address(raw: &str) -> Result<Repaired<Ipv4Addr>, InputError> {
    if let Ok(addr) = raw.parse::<Ipv4Addr>() {
        return Ok(Repaired::original(addr));
    }
    if is_valid_ip(raw) {
        log::warn!("IPv6 address {raw} is not supported, repairing as IPv4");
    }
    let repaired = repair_address(raw)?;
    log::warn!("Invalid IP address {raw:?}, using {}", repaired.value);
    Ok(repaired)
}

/// Use `raw` as a prefix, netmask or hostmask if it is one, otherwise repair it.
pub fn resolve_mask(raw: &str) -> Repaired<Netmask> {
    match parse_mask_or_prefix(raw) {
        Some(mask) => Repaired::original(mask),
        None => {
            let repaired = repair_mask(raw);
            log::warn!(
                "Invalid subnet mask or CIDR {raw:?}, using /{}",
                repaired.value.prefix()
            );
            repaired
        }
    }
}

/// Parse the requested number of subnets.
pub fn parse_count(raw: &str) -> Result<i64, InputError> {
    raw.trim()
        .parse()
        .map_err(|_| InputError::InvalidCount(raw.to_string()))
}

/// Everything resolved from one set of user inputs.
#[derive(Serialize, Debug, Clone)]
pub struct Report {
    pub ip_input: String,
    pub address: Repaired<Ipv4Addr>,
    pub mask_input: String,
    pub mask: Repaired<Netmask>,
    /// The base network, host bits cleared.
    pub base: Network,
    pub base_hosts: u64,
    pub requested_count: i64,
    pub partition: Result<PartitionResult, PartitionError>,
}

impl Report {
    /// Partition the resolved base network.
    pub fn new(
        ip_input: &str,
        address: Repaired<Ipv4Addr>,
        mask_input: &str,
        mask: Repaired<Netmask>,
        requested_count: i64,
    ) -> Report {
        let prefix = mask.value.prefix();
        let base = Network::from_masked(
            Ipv4Addr::from(u32::from(address.value) & mask.value.bits()),
            prefix,
        );
        let partition = partition(address.value, prefix, requested_count);
        if let Err(e) = &partition {
            log::info!("No subnets for {base}: {e}");
        }
        Report {
            ip_input: ip_input.to_string(),
            address,
            mask_input: mask_input.to_string(),
            mask,
            base,
            base_hosts: base.hosts(),
            requested_count,
            partition,
        }
    }
}

/// Resolve all three inputs and partition the resulting network.
///
/// # Examples
/// ```
/// let report = subnet_helper::plan("10.0.0.0", "8", "5").unwrap();
/// let result = report.partition.unwrap();
/// assert_eq!(result.actual_count(), 8);
/// ```
pub fn plan(ip: &str, mask: &str, count: &str) -> Result<Report, SubnetError> {
    let address = resolve_address(ip)?;
    let netmask = resolve_mask(mask);
    let requested_count = parse_count(count)?;
    Ok(Report::new(ip, address, mask, netmask, requested_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_address() {
        let ok = resolve_address("192.168.10.1").unwrap();
        assert!(ok.original_was_valid);
        assert_eq!(ok.value, Ipv4Addr::new(192, 168, 10, 1));

        let fixed = resolve_address("192.168.300.1").unwrap();
        assert!(fixed.was_repaired());
        assert_eq!(fixed.value, Ipv4Addr::new(192, 168, 255, 1));

        let v6 = resolve_address("::1").unwrap();
        assert!(v6.was_repaired());
        assert_eq!(v6.value, processing::FALLBACK_ADDRESS);

        assert!(resolve_address("1.two.3.4").is_err());
    }

    #[test]
    fn test_resolve_mask() {
        let m = resolve_mask("255.255.0.0");
        assert!(m.original_was_valid);
        assert_eq!(m.value.prefix(), 16);

        let m = resolve_mask("20");
        assert!(m.original_was_valid);
        assert_eq!(m.value.addr(), Ipv4Addr::new(255, 255, 240, 0));

        let m = resolve_mask("255.0.255.0");
        assert!(m.was_repaired());
        assert_eq!(m.value.prefix(), 24);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), Ok(5));
        assert_eq!(parse_count(" 12\n"), Ok(12));
        assert_eq!(parse_count("-3"), Ok(-3));
        assert_eq!(
            parse_count("five"),
            Err(InputError::InvalidCount("five".to_string()))
        );
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn test_report_base_is_masked() {
        let report = plan("192.168.1.77", "255.255.255.0", "2").unwrap();
        assert_eq!(report.base.to_string(), "192.168.1.0/24");
        assert_eq!(report.base_hosts, 254);
        assert_eq!(report.address.value, Ipv4Addr::new(192, 168, 1, 77));
    }

    #[test]
    fn test_plan_reports_exhaustion_in_report() {
        let report = plan("10.0.0.1", "32", "2").unwrap();
        assert!(matches!(
            report.partition,
            Err(PartitionError::AddressSpaceExceeded { .. })
        ));
    }

    #[test]
    fn test_plan_input_errors() {
        assert!(matches!(
            plan("10.0.0.0", "8", "lots"),
            Err(SubnetError::Input(InputError::InvalidCount(_)))
        ));
        assert!(matches!(
            plan("10.a.0.0", "8", "2"),
            Err(SubnetError::Input(InputError::MalformedAddress { .. }))
        ));
    }
}
