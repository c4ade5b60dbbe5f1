use std::fmt;

use thiserror::Error;

/// Classifies pattern parse failures for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// The entry did not split into exactly four dot-separated components
    ComponentCount,
    /// A component was not `%` and not made of ASCII decimal digits
    InvalidOctet,
    /// A numeric component was greater than 255
    OutOfRange,
}

impl fmt::Display for PatternErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PatternErrorKind::ComponentCount => "expected exactly four dot-separated octets",
            PatternErrorKind::InvalidOctet => "octet is not a decimal number or '%'",
            PatternErrorKind::OutOfRange => "octet value exceeds 255",
        };
        f.write_str(reason)
    }
}

/// Allow-list error types
#[derive(Error, Debug)]
pub enum AclError {
    #[error("Invalid pattern '{pattern}': {kind}")]
    InvalidPattern {
        kind: PatternErrorKind,
        pattern: String,
    },

    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("No valid pattern in configuration: {0}")]
    NoValidPatterns(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, AclError>;
