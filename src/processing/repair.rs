//! Best-effort repair of malformed address and mask input.

use crate::models::{InputError, Netmask, Repaired};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

/// Substitute for input that does not have four dotted parts.
pub const FALLBACK_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

/// Substitute prefix length for an unusable mask.
pub const FALLBACK_PREFIX: u8 = 24;

lazy_static! {
    static ref INTEGER_TOKEN: Regex =
        Regex::new(r"^\s*(?P<sign>[+-]?)(?P<digits>[0-9]+)\s*$").expect("Invalid Regex?");
}

/// Clamp a base-10 integer token into an octet; `None` if it is not an integer.
fn clamp_octet(token: &str) -> Option<u8> {
    let caps = INTEGER_TOKEN.captures(token)?;
    if &caps["sign"] == "-" {
        return Some(0);
    }
    // The regex only admits digits, so the parse can only fail on overflow.
    let value = caps["digits"].parse::<u64>().unwrap_or(u64::MAX);
    Some(u8::try_from(value).unwrap_or(u8::MAX))
}

/// Coerce `raw` into the nearest IPv4 address.
///
/// Input without exactly four dot-separated parts is replaced by
/// [`FALLBACK_ADDRESS`]. Otherwise every part is clamped into `0..=255`
/// independently; a part that is not an integer is an error.
///
/// # Examples
/// ```
/// use subnet_helper::processing::repair_address;
/// let fixed = repair_address("300.1.-4.20").unwrap();
/// assert_eq!(fixed.value.to_string(), "255.1.0.20");
/// assert!(fixed.was_repaired());
/// ```
pub fn repair_address(raw: &str) -> Result<Repaired<Ipv4Addr>, InputError> {
    let Some(tokens) = raw.split('.').collect_tuple::<(_, _, _, _)>() else {
        log::debug!("repair_address({raw:?}) not four parts, using {FALLBACK_ADDRESS}");
        return Ok(Repaired::substituted(FALLBACK_ADDRESS));
    };
    let (a, b, c, d) = tokens;

    let mut octets = [0u8; 4];
    for (octet, token) in octets.iter_mut().zip([a, b, c, d]) {
        *octet = clamp_octet(token).ok_or_else(|| InputError::MalformedAddress {
            raw: raw.to_string(),
            token: token.to_string(),
        })?;
    }
    let addr = Ipv4Addr::from(octets);

    if raw.parse::<Ipv4Addr>().is_ok() {
        Ok(Repaired::original(addr))
    } else {
        log::debug!("repair_address({raw:?}) clamped to {addr}");
        Ok(Repaired::substituted(addr))
    }
}

/// Coerce `raw` into a prefix length, falling back to [`FALLBACK_PREFIX`].
///
/// Only the prefix-length form is understood here; dotted masks are handled
/// by [`parse_mask_or_prefix`](super::parse_mask_or_prefix).
pub fn repair_mask(raw: &str) -> Repaired<Netmask> {
    match Netmask::from_prefix_str(raw) {
        Some(mask) => Repaired::original(mask),
        None => {
            log::debug!("repair_mask({raw:?}) using /{FALLBACK_PREFIX}");
            Repaired::substituted(Netmask::clamped(FALLBACK_PREFIX))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_octet() {
        assert_eq!(clamp_octet("0"), Some(0));
        assert_eq!(clamp_octet("255"), Some(255));
        assert_eq!(clamp_octet("256"), Some(255));
        assert_eq!(clamp_octet("-1"), Some(0));
        assert_eq!(clamp_octet("+7"), Some(7));
        assert_eq!(clamp_octet(" 12 "), Some(12));
        assert_eq!(clamp_octet("99999999999999999999999"), Some(255));
        assert_eq!(clamp_octet("-99999999999999999999999"), Some(0));
        assert_eq!(clamp_octet("1a"), None);
        assert_eq!(clamp_octet(""), None);
        assert_eq!(clamp_octet("--1"), None);
    }

    #[test]
    fn test_repair_address_keeps_valid_input() {
        for raw in ["0.0.0.0", "10.20.30.40", "192.168.1.254", "255.255.255.255"] {
            let fixed = repair_address(raw).unwrap();
            assert!(fixed.original_was_valid, "{raw} should be kept");
            assert_eq!(fixed.value.to_string(), raw);
        }
    }

    #[test]
    fn test_repair_address_clamps_each_octet() {
        let fixed = repair_address("256.-1.300.7").unwrap();
        assert!(fixed.was_repaired());
        assert_eq!(fixed.value, Ipv4Addr::new(255, 0, 255, 7));

        let fixed = repair_address("010.1.1.1").unwrap();
        assert_eq!(fixed.value, Ipv4Addr::new(10, 1, 1, 1));
    }

    #[test]
    fn test_repair_address_octets_in_range() {
        for first in (-300i64..=600).step_by(37) {
            for last in [-1i64, 0, 128, 255, 256, 1000] {
                let raw = format!("{first}.5.{last}.9");
                let fixed = repair_address(&raw).unwrap().value.octets();
                assert_eq!(fixed[0], first.clamp(0, 255) as u8, "{raw}");
                assert_eq!(fixed[1], 5);
                assert_eq!(fixed[2], last.clamp(0, 255) as u8, "{raw}");
                assert_eq!(fixed[3], 9);
            }
        }
    }

    #[test]
    fn test_repair_address_wrong_token_count() {
        for raw in ["", "1", "1.2.3", "1.2.3.4.5", "::1", "hello", "a.b.c"] {
            let fixed = repair_address(raw).unwrap();
            assert!(fixed.was_repaired());
            assert_eq!(fixed.value, FALLBACK_ADDRESS, "{raw}");
        }
    }

    #[test]
    fn test_repair_address_non_numeric() {
        let err = repair_address("10.x.0.1").unwrap_err();
        assert_eq!(
            err,
            InputError::MalformedAddress {
                raw: "10.x.0.1".to_string(),
                token: "x".to_string()
            }
        );
        assert!(repair_address("10..0.1").is_err());
    }

    #[test]
    fn test_repair_mask_accepts_prefixes() {
        for prefix in 0..=32u8 {
            let fixed = repair_mask(&prefix.to_string());
            assert!(fixed.original_was_valid);
            assert_eq!(fixed.value.prefix(), prefix);
        }
    }

    #[test]
    fn test_repair_mask_fallback() {
        for raw in ["33", "-1", "abc", "", "255.255.255.0", "24.5", "1000"] {
            let fixed = repair_mask(raw);
            assert!(fixed.was_repaired(), "{raw}");
            assert_eq!(fixed.value.prefix(), FALLBACK_PREFIX);
            assert_eq!(fixed.value.addr(), Ipv4Addr::new(255, 255, 255, 0));
        }
    }
}
