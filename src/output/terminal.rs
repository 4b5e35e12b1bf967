//! Terminal output.
//!
//! Each function returns the text for one stage of the interactive session
//! so the binary can print it as soon as the matching input is known.

use crate::models::{InputError, Netmask, Network, Repaired};
use crate::processing::PartitionResult;
use crate::Report;
use colored::Colorize;
use itertools::Itertools;
use std::net::Ipv4Addr;

/// Format a value as a right-aligned field of at least `width` characters.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    format!("{:>width$}", value.to_string())
}

/// Suggestion lines for a repaired address, empty if the input was used as-is.
pub fn render_address(raw: &str, address: &Repaired<Ipv4Addr>) -> String {
    if address.original_was_valid {
        return String::new();
    }
    format!(
        "{} Suggesting a valid IP closest to {raw}...\nSuggested valid IP: {}\n",
        "Invalid IP address.".red(),
        address.value.to_string().green()
    )
}

/// Suggestion lines for a repaired mask, empty if the input was used as-is.
pub fn render_mask(mask: &Repaired<Netmask>) -> String {
    if mask.original_was_valid {
        return String::new();
    }
    format!(
        "{} Suggesting a valid subnet mask...\nSuggested valid subnet mask: {} (/{} CIDR)\n",
        "Invalid subnet mask or CIDR.".red(),
        mask.value.to_string().green(),
        mask.value.prefix()
    )
}

pub fn render_base(address: Ipv4Addr, mask: Netmask) -> String {
    format!(
        "Base Network: {address}/{prefix} with subnet mask {mask}\n",
        prefix = mask.prefix()
    )
}

/// One table row for a child subnet.
pub fn subnet_row(index: u64, subnet: &Network) -> String {
    format!(
        "{index}  {cidr:<18} {broadcast:<15} {hosts}",
        index = format_field(index, 6),
        cidr = subnet.to_string(),
        broadcast = subnet.hi().to_string(),
        hosts = format_field(subnet.hosts(), 10)
    )
}

/// Explanation and table of child subnets.
pub fn render_subnets(result: &PartitionResult, requested: i64) -> String {
    let header = format!(
        "{}  {:<18} {:<15} {}",
        format_field("#", 6),
        "subnet_cidr",
        "broadcast",
        format_field("hosts", 10)
    );
    let rows = (0u64..)
        .zip(result.subnets())
        .map(|(i, subnet)| subnet_row(i, &subnet))
        .join("\n");
    format!(
        "{}\nSuggested non-overlapping CIDRs for {requested} subnets:\n{}\n{rows}\n",
        result.explanation(),
        header.bold()
    )
}

/// Partition outcome of a report: the subnet table or why there is none.
pub fn render_partition(report: &Report) -> String {
    match &report.partition {
        Ok(result) => render_subnets(result, report.requested_count),
        Err(e) => format!(
            "{}\n{}\n",
            "Could not generate subnets with the given input.".red(),
            e
        ),
    }
}

pub fn render_input_error(error: &InputError) -> String {
    match error {
        InputError::InvalidCount(_) => format!(
            "{}\n",
            "Invalid input. Please ensure you enter a numerical value for the number of subnets."
                .red()
        ),
        InputError::MalformedAddress { .. } => format!("{}\n", error.to_string().red()),
    }
}

/// The complete session output for a report.
pub fn render_report(report: &Report) -> String {
    [
        render_address(&report.ip_input, &report.address),
        render_mask(&report.mask),
        render_base(report.address.value, report.mask.value),
        render_partition(report),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "      test");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "long_value");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "    42");
    }

    #[test]
    fn test_subnet_row() {
        let net = Network::from_cidr("10.224.0.0/11").unwrap();
        assert_eq!(
            subnet_row(7, &net),
            "     7  10.224.0.0/11      10.255.255.255     2097150"
        );
    }

    #[test]
    fn test_render_valid_inputs_have_no_suggestions() {
        let report = plan("10.0.0.0", "8", "5").unwrap();
        assert!(render_address(&report.ip_input, &report.address).is_empty());
        assert!(render_mask(&report.mask).is_empty());
        assert_eq!(
            render_base(report.address.value, report.mask.value),
            "Base Network: 10.0.0.0/8 with subnet mask 255.0.0.0\n"
        );
    }

    #[test]
    fn test_render_repaired_inputs() {
        let report = plan("10.0.0.300", "99", "2").unwrap();
        let text = render_report(&report);
        assert!(text.contains("closest to 10.0.0.300..."));
        assert!(text.contains("10.0.0.255"));
        assert!(text.contains("(/24 CIDR)"));
        assert!(text.contains("Base Network: 10.0.0.255/24 with subnet mask 255.255.255.0"));
    }

    #[test]
    fn test_render_partition_rows() {
        let report = plan("10.0.0.0", "8", "5").unwrap();
        let text = render_partition(&report);
        assert!(text.starts_with("Requested 5 subnet(s); due to binary subdivision"));
        assert!(text.contains("Suggested non-overlapping CIDRs for 5 subnets:"));
        assert!(text.contains("10.0.0.0/11"));
        assert!(text.contains("10.224.0.0/11"));
        assert_eq!(text.matches("/11").count(), 8);
    }

    #[test]
    fn test_render_partition_error() {
        let report = plan("10.0.0.1", "32", "2").unwrap();
        let text = render_partition(&report);
        assert!(text.contains("Could not generate subnets with the given input."));
        assert!(text.contains("/33 prefix"));
    }

    #[test]
    fn test_render_input_error() {
        let text = render_input_error(&InputError::InvalidCount("x".to_string()));
        assert!(text.contains("numerical value for the number of subnets"));
    }
}
