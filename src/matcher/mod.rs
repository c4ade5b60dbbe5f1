mod pattern_set;

pub use pattern_set::PatternSet;

use std::net::{IpAddr, Ipv4Addr};

use crate::types::PatternRule;

/// Trait for address matchers
pub trait AddressMatcher: Send + Sync {
    /// Check if the IPv4 address matches this matcher
    fn matches_ipv4(&self, addr: Ipv4Addr) -> bool;

    /// Check an address of either family.
    ///
    /// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are checked as IPv4;
    /// any other IPv6 address does not match.
    fn matches_ip(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.matches_ipv4(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some_and(|v4| self.matches_ipv4(v4)),
        }
    }
}

impl AddressMatcher for PatternRule {
    fn matches_ipv4(&self, addr: Ipv4Addr) -> bool {
        self.matches_octets(addr.octets())
    }
}
