use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use super::AddressMatcher;
use crate::parser::parse_address;
use crate::types::{PatternRule, RuleList};

/// Compiled allow-list.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PatternSet {
    /// No restriction: every address is allowed
    #[default]
    AllowAll,
    /// Allowed if any rule matches
    Rules(RuleList),
}

impl PatternSet {
    /// Create a set from parsed rules, collapsing an empty list to `AllowAll`
    pub fn from_rules(rules: Vec<PatternRule>) -> Self {
        RuleList::new(rules).map_or(PatternSet::AllowAll, PatternSet::Rules)
    }

    pub fn is_allow_all(&self) -> bool {
        matches!(self, PatternSet::AllowAll)
    }

    /// The configured rules, empty for `AllowAll`
    pub fn rules(&self) -> &[PatternRule] {
        match self {
            PatternSet::AllowAll => &[],
            PatternSet::Rules(rules) => rules.as_slice(),
        }
    }

    /// Get the number of rules
    pub fn rule_count(&self) -> usize {
        self.rules().len()
    }

    /// Check a dotted-decimal address string.
    ///
    /// `AllowAll` returns `true` without looking at the address. Otherwise an
    /// address that fails to parse never matches.
    pub fn matches(&self, address: &str) -> bool {
        let rules = match self {
            PatternSet::AllowAll => return true,
            PatternSet::Rules(rules) => rules,
        };

        match parse_address(address) {
            Ok(addr) => any_rule_matches(rules, addr),
            Err(_) => false,
        }
    }
}

fn any_rule_matches(rules: &RuleList, addr: Ipv4Addr) -> bool {
    let octets = addr.octets();
    rules.iter().any(|rule| rule.matches_octets(octets))
}

impl AddressMatcher for PatternSet {
    fn matches_ipv4(&self, addr: Ipv4Addr) -> bool {
        match self {
            PatternSet::AllowAll => true,
            PatternSet::Rules(rules) => any_rule_matches(rules, addr),
        }
    }

    fn matches_ip(&self, ip: IpAddr) -> bool {
        match (self, ip) {
            (PatternSet::AllowAll, _) => true,
            (_, IpAddr::V4(v4)) => self.matches_ipv4(v4),
            (_, IpAddr::V6(v6)) => v6.to_ipv4_mapped().is_some_and(|v4| self.matches_ipv4(v4)),
        }
    }
}

/// Formats as a pattern list that builds back into an equal set.
/// `AllowAll` formats as the empty string.
impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
