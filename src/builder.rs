use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AclError, Result};
use crate::matcher::PatternSet;
use crate::parser::{parse_pattern, split_entries};
use crate::types::{PatternRule, RuleList};

/// What to do when a non-empty configuration yields no valid pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Fail open: treat the configuration as "no restriction"
    #[default]
    AllowAll,
    /// Refuse the configuration with [`AclError::NoValidPatterns`]
    Reject,
}

/// Parsed entries of a pattern list
struct Collected {
    rules: Vec<PatternRule>,
    discarded: usize,
}

fn collect_rules(patterns: &str) -> Collected {
    let mut collected = Collected {
        rules: Vec::new(),
        discarded: 0,
    };

    for entry in split_entries(patterns) {
        match parse_pattern(entry) {
            Ok(rule) => collected.rules.push(rule),
            Err(err) => {
                warn!(pattern = %entry, error = %err, "discarding invalid address pattern");
                collected.discarded += 1;
            }
        }
    }

    collected
}

/// Build a pattern set, falling back to `AllowAll` when nothing parses.
///
/// Never fails: invalid entries are dropped one by one.
pub fn build(patterns: &str) -> PatternSet {
    // The default policy never rejects
    build_with(patterns, FallbackPolicy::AllowAll).unwrap_or_default()
}

/// Build a pattern set with an explicit fallback policy.
///
/// An empty list, or one holding only separators and whitespace, is always
/// `AllowAll`. The policy only decides the case where entries were present
/// and every one of them was invalid.
pub fn build_with(patterns: &str, fallback: FallbackPolicy) -> Result<PatternSet> {
    if patterns.is_empty() {
        return Ok(PatternSet::AllowAll);
    }

    let Collected { rules, discarded } = collect_rules(patterns);

    if let Some(rules) = RuleList::new(rules) {
        debug!(rules = rules.len(), discarded, "built address allow-list");
        return Ok(PatternSet::Rules(rules));
    }

    if discarded == 0 {
        debug!("address allow-list has no entries, allowing all");
        return Ok(PatternSet::AllowAll);
    }

    match fallback {
        FallbackPolicy::AllowAll => {
            warn!(
                discarded,
                "no valid address pattern in allow-list, allowing all addresses"
            );
            Ok(PatternSet::AllowAll)
        }
        FallbackPolicy::Reject => Err(AclError::NoValidPatterns(patterns.to_string())),
    }
}
