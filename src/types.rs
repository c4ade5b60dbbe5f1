use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::AclError;

/// Match rule for a single octet position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctetRule {
    /// Matches only this exact value
    Fixed(u8),
    /// Matches any value in 0..=255
    Wildcard,
}

impl OctetRule {
    /// Check if this rule accepts the given octet value
    pub fn matches(&self, octet: u8) -> bool {
        match self {
            OctetRule::Fixed(value) => *value == octet,
            OctetRule::Wildcard => true,
        }
    }
}

impl fmt::Display for OctetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctetRule::Fixed(value) => write!(f, "{}", value),
            OctetRule::Wildcard => f.write_str("%"),
        }
    }
}

/// One parsed address pattern, e.g. `192.168.0.%`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternRule {
    octets: [OctetRule; 4],
}

impl PatternRule {
    /// Create a pattern from its four octet rules
    pub fn new(octets: [OctetRule; 4]) -> Self {
        Self { octets }
    }

    /// Create a pattern that matches exactly one address
    pub fn exact(addr: Ipv4Addr) -> Self {
        Self::new(addr.octets().map(OctetRule::Fixed))
    }

    /// The four octet rules, most significant first
    pub fn octets(&self) -> &[OctetRule; 4] {
        &self.octets
    }

    /// Check every position against the address octets
    pub fn matches_octets(&self, octets: [u8; 4]) -> bool {
        self.octets
            .iter()
            .zip(octets)
            .all(|(rule, octet)| rule.matches(octet))
    }

    /// Number of wildcard positions in this pattern
    pub fn wildcard_count(&self) -> usize {
        self.octets
            .iter()
            .filter(|rule| matches!(rule, OctetRule::Wildcard))
            .count()
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.octets;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for PatternRule {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_pattern(s)
    }
}

/// Ordered, non-empty list of pattern rules.
///
/// Only constructible through [`RuleList::new`], which refuses an empty list,
/// so a [`PatternSet::Rules`](crate::PatternSet::Rules) can never be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleList(Vec<PatternRule>);

impl RuleList {
    /// Wrap the rules, or `None` if there are none
    pub fn new(rules: Vec<PatternRule>) -> Option<Self> {
        if rules.is_empty() {
            None
        } else {
            Some(Self(rules))
        }
    }

    pub fn as_slice(&self) -> &[PatternRule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternRule> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a PatternRule;
    type IntoIter = std::slice::Iter<'a, PatternRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octet_rule_matches() {
        assert!(OctetRule::Fixed(10).matches(10));
        assert!(!OctetRule::Fixed(10).matches(11));
        assert!(OctetRule::Wildcard.matches(0));
        assert!(OctetRule::Wildcard.matches(255));
    }

    #[test]
    fn test_pattern_rule_display() {
        let rule = PatternRule::new([
            OctetRule::Fixed(192),
            OctetRule::Fixed(168),
            OctetRule::Wildcard,
            OctetRule::Wildcard,
        ]);
        assert_eq!(rule.to_string(), "192.168.%.%");
        assert_eq!(rule.wildcard_count(), 2);
    }

    #[test]
    fn test_pattern_rule_display_parses_back() {
        let rule: PatternRule = "%.0.0.1".parse().unwrap();
        let reparsed: PatternRule = rule.to_string().parse().unwrap();
        assert_eq!(rule, reparsed);
    }

    #[test]
    fn test_exact_rule() {
        let rule = PatternRule::exact(Ipv4Addr::new(127, 0, 0, 1));
        assert!(rule.matches_octets([127, 0, 0, 1]));
        assert!(!rule.matches_octets([127, 0, 0, 2]));
        assert_eq!(rule.wildcard_count(), 0);
    }

    #[test]
    fn test_rule_list_refuses_empty() {
        assert!(RuleList::new(Vec::new()).is_none());

        let list = RuleList::new(vec![PatternRule::exact(Ipv4Addr::LOCALHOST)]).unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
    }
}
