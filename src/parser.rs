use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::{AclError, PatternErrorKind, Result};
use crate::types::{OctetRule, PatternRule};

/// Separator between entries in a pattern list
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between octets in an address or pattern
pub const OCTET_SEPARATOR: char = '.';

/// Token that matches any octet value
pub const WILDCARD: &str = "%";

/// Whitespace trimmed around each pattern entry
fn is_entry_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split a pattern list into trimmed, non-empty entries.
pub fn split_entries(patterns: &str) -> impl Iterator<Item = &str> {
    patterns
        .split(ENTRY_SEPARATOR)
        .map(|entry| entry.trim_matches(is_entry_whitespace))
        .filter(|entry| !entry.is_empty())
}

/// Split dotted text into exactly four components, nothing left over
fn split_octets(text: &str) -> Option<[&str; 4]> {
    let mut parts = text.split(OCTET_SEPARATOR);
    let octets = [parts.next()?, parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

/// Parse one decimal octet. Digits only: no sign, no whitespace.
fn parse_octet(component: &str) -> std::result::Result<u8, PatternErrorKind> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PatternErrorKind::InvalidOctet);
    }
    component
        .parse::<u8>()
        .map_err(|_| PatternErrorKind::OutOfRange)
}

/// Parse a single pattern such as `192.168.0.%`.
///
/// The entry must already be trimmed; surrounding whitespace is an error here.
pub fn parse_pattern(pattern: &str) -> Result<PatternRule> {
    let invalid = |kind: PatternErrorKind| AclError::InvalidPattern {
        kind,
        pattern: pattern.to_string(),
    };

    let components =
        split_octets(pattern).ok_or_else(|| invalid(PatternErrorKind::ComponentCount))?;

    let mut octets = [OctetRule::Wildcard; 4];
    for (slot, component) in octets.iter_mut().zip(components) {
        if component != WILDCARD {
            *slot = OctetRule::Fixed(parse_octet(component).map_err(invalid)?);
        }
    }

    Ok(PatternRule::new(octets))
}

/// Parse a dotted-decimal IPv4 address with the same octet grammar as
/// patterns, minus the wildcard.
pub fn parse_address(address: &str) -> Result<Ipv4Addr> {
    let invalid = || AclError::InvalidAddress(address.to_string());

    let components = split_octets(address).ok_or_else(invalid)?;

    let mut octets = [0u8; 4];
    for (slot, component) in octets.iter_mut().zip(components) {
        *slot = parse_octet(component).map_err(|_| invalid())?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Turn pattern file contents into a single pattern list.
///
/// `#` starts a comment running to end of line. Entries may be separated by
/// commas or newlines.
pub fn patterns_from_text(text: &str) -> String {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = match line.find('#') {
            Some(comment_pos) => &line[..comment_pos],
            None => line,
        };
        entries.extend(split_entries(line));
    }

    entries.join(",")
}

/// Read a pattern list from a file.
pub fn read_patterns_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        AclError::ConfigError(format!(
            "Failed to read patterns file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(patterns_from_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(pattern: &str) -> PatternErrorKind {
        match parse_pattern(pattern) {
            Err(AclError::InvalidPattern { kind, .. }) => kind,
            other => panic!("expected InvalidPattern for {:?}, got {:?}", pattern, other),
        }
    }

    #[test]
    fn test_split_entries_trims_and_skips_empty() {
        let entries: Vec<&str> = split_entries(" 127.0.0.1 ,\t192.168.0.%\r\n,, ,").collect();
        assert_eq!(entries, vec!["127.0.0.1", "192.168.0.%"]);
    }

    #[test]
    fn test_parse_exact_pattern() {
        let rule = parse_pattern("192.168.0.1").unwrap();
        assert_eq!(
            rule.octets(),
            &[
                OctetRule::Fixed(192),
                OctetRule::Fixed(168),
                OctetRule::Fixed(0),
                OctetRule::Fixed(1)
            ]
        );
    }

    #[test]
    fn test_parse_wildcard_pattern() {
        let rule = parse_pattern("192.168.0.%").unwrap();
        assert_eq!(rule.octets()[3], OctetRule::Wildcard);

        let rule = parse_pattern("%.%.%.%").unwrap();
        assert_eq!(rule.wildcard_count(), 4);
    }

    #[test]
    fn test_parse_pattern_component_count() {
        assert_eq!(kind_of("1.2.3"), PatternErrorKind::ComponentCount);
        assert_eq!(kind_of("1.2.3.4.5"), PatternErrorKind::ComponentCount);
        assert_eq!(kind_of("1.2.3.4."), PatternErrorKind::ComponentCount);
        assert_eq!(kind_of("not.a.pattern"), PatternErrorKind::ComponentCount);
        assert_eq!(kind_of(""), PatternErrorKind::ComponentCount);
    }

    #[test]
    fn test_parse_pattern_invalid_octet() {
        assert_eq!(kind_of("1.2.3.x"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2..4"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2.3.-1"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2.3.+1"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2.3.%%"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2.3.4a"), PatternErrorKind::InvalidOctet);
        assert_eq!(kind_of("1.2. 3.4"), PatternErrorKind::InvalidOctet);
    }

    #[test]
    fn test_parse_pattern_out_of_range() {
        assert_eq!(kind_of("1.2.3.256"), PatternErrorKind::OutOfRange);
        assert_eq!(kind_of("1.2.3.99999999999999999999"), PatternErrorKind::OutOfRange);
    }

    #[test]
    fn test_parse_pattern_leading_zeros() {
        // Decimal, as written; "010" is ten, not octal eight
        let rule = parse_pattern("010.0.0.001").unwrap();
        assert_eq!(rule.octets()[0], OctetRule::Fixed(10));
        assert_eq!(rule.octets()[3], OctetRule::Fixed(1));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("192.168.0.42").unwrap(),
            Ipv4Addr::new(192, 168, 0, 42)
        );
        assert_eq!(
            parse_address("255.255.255.255").unwrap(),
            Ipv4Addr::BROADCAST
        );
    }

    #[test]
    fn test_parse_address_rejects_malformed() {
        for bad in [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.256",
            "not.an.ip",
            "not.an.ip.address",
            "1.2.3.4.",
            " 1.2.3.4",
            "1.2.3.4 ",
            "+1.2.3.4",
            "-1.2.3.4",
            "1.2.3.%",
        ] {
            assert!(
                matches!(parse_address(bad), Err(AclError::InvalidAddress(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_patterns_from_text() {
        let text = r#"
# Local access
127.0.0.1
192.168.0.%, 10.0.0.% # office networks

"#;
        assert_eq!(
            patterns_from_text(text),
            "127.0.0.1,192.168.0.%,10.0.0.%"
        );
    }

    #[test]
    fn test_patterns_from_text_only_comments() {
        assert_eq!(patterns_from_text("# nothing here\n\n"), "");
    }

    #[test]
    fn test_read_patterns_file() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("ip_allowlist_parser_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("allow.conf");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "127.0.0.1 # loopback").unwrap();
        writeln!(f, "10.0.%.%").unwrap();
        drop(f);

        let patterns = read_patterns_file(&file_path).unwrap();
        assert_eq!(patterns, "127.0.0.1,10.0.%.%");

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_read_patterns_file_not_found() {
        let result = read_patterns_file("/nonexistent/path/allow.conf");
        assert!(matches!(result, Err(AclError::ConfigError(_))));
    }
}
