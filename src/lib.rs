//! IP Allow-list - IPv4 access-control matching with per-octet wildcards
//!
//! This library decides whether a client address is permitted by a
//! configured list of patterns. It is meant for gating admin command sources
//! and console / remote-console accept filters.
//!
//! # Example
//!
//! ```rust
//! use ip_allowlist::{build, AccessFilter, FilterOptions};
//!
//! let set = build("127.0.0.1, 192.168.0.%, 10.0.0.%");
//! assert!(set.matches("192.168.0.42"));
//! assert!(!set.matches("172.16.0.1"));
//!
//! // Owned filter with replace-on-reload
//! let filter = AccessFilter::new("127.0.0.1", FilterOptions::new()).unwrap();
//! assert!(!filter.is_allowed("10.0.0.1"));
//! filter.reload("10.0.0.%").unwrap();
//! assert!(filter.is_allowed("10.0.0.1"));
//! ```
//!
//! # Pattern Syntax
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `192.168.0.1` | Exactly that address |
//! | `192.168.0.%` | `192.168.0.0` through `192.168.0.255` |
//! | `192.168.%.%` | Any address starting with `192.168` |
//! | `%.0.0.1` | Any first octet followed by `0.0.1` |
//!
//! Patterns are separated by `,`; whitespace around each entry is ignored.
//! An empty list allows every address. Invalid entries are dropped, and a
//! list in which no entry is valid also allows every address unless
//! [`FallbackPolicy::Reject`] is selected.
//!
//! Addresses that are not strict dotted-decimal IPv4 never match a
//! restricted list.

pub mod builder;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use builder::{build, build_with, FallbackPolicy};
pub use error::{AclError, PatternErrorKind, Result};
pub use filter::{AccessFilter, FilterOptions};
pub use matcher::{AddressMatcher, PatternSet};
pub use parser::{parse_address, parse_pattern};
pub use types::{OctetRule, PatternRule, RuleList};
