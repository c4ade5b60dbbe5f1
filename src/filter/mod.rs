//! Access filter module.
//!
//! Owns the active allow-list of a listener or command source and swaps it
//! atomically on reload.

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::builder::{build_with, FallbackPolicy};
use crate::error::Result;
use crate::matcher::{AddressMatcher, PatternSet};
use crate::parser::read_patterns_file;

/// Access filter options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Policy applied when a configuration holds no valid pattern
    pub fallback: FallbackPolicy,
}

impl FilterOptions {
    /// Create new filter options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Accept filter backed by a replace-on-reload [`PatternSet`].
///
/// Readers never see a partially built set: a reload builds the new set
/// first and then swaps a single `Arc`.
pub struct AccessFilter {
    current: RwLock<Arc<PatternSet>>,
    options: FilterOptions,
}

impl AccessFilter {
    /// Create a new filter from a comma-separated pattern list.
    pub fn new(patterns: &str, options: FilterOptions) -> Result<Self> {
        let set = build_with(patterns, options.fallback)?;
        Ok(Self::from_pattern_set(set, options))
    }

    /// Create a new filter from a patterns file.
    pub fn from_file(path: impl AsRef<Path>, options: FilterOptions) -> Result<Self> {
        let patterns = read_patterns_file(path)?;
        Self::new(&patterns, options)
    }

    /// Wrap an already built set.
    pub fn from_pattern_set(set: PatternSet, options: FilterOptions) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            options,
        }
    }

    /// The currently active set.
    pub fn snapshot(&self) -> Arc<PatternSet> {
        self.current.read().clone()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Check a dotted-decimal address string against the active set.
    pub fn is_allowed(&self, address: &str) -> bool {
        let allowed = self.snapshot().matches(address);
        trace!(address, allowed, "access filter decision");
        allowed
    }

    /// Check a socket peer address against the active set.
    pub fn is_allowed_ip(&self, ip: IpAddr) -> bool {
        let allowed = self.snapshot().matches_ip(ip);
        trace!(%ip, allowed, "access filter decision");
        allowed
    }

    /// Replace the active set.
    ///
    /// On error the previous set stays active.
    pub fn reload(&self, patterns: &str) -> Result<()> {
        let set = build_with(patterns, self.options.fallback)?;
        info!(
            rules = set.rule_count(),
            allow_all = set.is_allow_all(),
            "reloaded address allow-list"
        );
        *self.current.write() = Arc::new(set);
        Ok(())
    }

    /// Replace the active set from a patterns file.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let patterns = read_patterns_file(path)?;
        self.reload(&patterns)
    }
}

impl Default for AccessFilter {
    fn default() -> Self {
        Self::from_pattern_set(PatternSet::AllowAll, FilterOptions::default())
    }
}
