//! Routing table and lookup.
//!
//! # Responsibilities
//! - Store registered entries in insertion order
//! - Look up the entry for the current host
//! - Apply add/remove/repair edits requested by the application state
//!
//! # Design Decisions
//! - First match in table order wins; order is otherwise only for display
//! - Explicit `None` for an unregistered host rather than a silent default
//! - Edits never validate beyond scheme normalization

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{Matcher, SubstringMatcher};
use crate::routing::normalize::{needs_scheme, normalize};

/// A registered domain plus its two alternate destinations.
///
/// Serialized with the field names used by existing stores. A missing site
/// field loads as blank so the rest of the table stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
    /// Substring key matched against the current hostname.
    pub domain: String,

    /// Destination when the IPv6 probe succeeds (and the intranet one failed).
    #[serde(rename = "ipv6Site", default)]
    pub ipv6_site: String,

    /// Destination when the intranet probe succeeds.
    #[serde(rename = "intranetSite", default)]
    pub intranet_site: String,
}

impl RoutingEntry {
    /// Build an entry with both site URLs normalized.
    pub fn new(domain: impl Into<String>, ipv6_site: &str, intranet_site: &str) -> Self {
        Self {
            domain: domain.into(),
            ipv6_site: normalize(ipv6_site),
            intranet_site: normalize(intranet_site),
        }
    }

    /// Returns true if this entry applies to `host`.
    pub fn matches(&self, host: &str) -> bool {
        SubstringMatcher::new(&self.domain).matches(host)
    }

    /// Normalize both site URLs in place, returning how many changed.
    /// Blank sites have nothing to repair and stay blank.
    fn repair(&mut self) -> usize {
        let mut fixed = 0;
        for site in [&mut self.ipv6_site, &mut self.intranet_site] {
            if !site.is_empty() && needs_scheme(site) {
                *site = normalize(site);
                fixed += 1;
            }
        }
        fixed
    }
}

/// Ordered collection of routing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    entries: Vec<RoutingEntry>,
}

impl RoutingTable {
    pub fn new(entries: Vec<RoutingEntry>) -> Self {
        Self { entries }
    }

    /// Return the first entry (in table order) whose domain is contained in
    /// `host`.
    pub fn find_match(&self, host: &str) -> Option<&RoutingEntry> {
        self.entries.iter().find(|entry| entry.matches(host))
    }

    /// Returns true if an entry is registered under exactly `domain`.
    pub fn contains_domain(&self, domain: &str) -> bool {
        self.entries.iter().any(|entry| entry.domain == domain)
    }

    pub fn push(&mut self, entry: RoutingEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry that matches `host`, returning how many went.
    pub fn remove_matching(&mut self, host: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.matches(host));
        before - self.entries.len()
    }

    /// Remove the entry at a 0-based position.
    pub fn remove_at(&mut self, index: usize) -> Option<RoutingEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Normalize every non-blank site URL, returning how many were changed.
    pub fn repair(&mut self) -> usize {
        self.entries.iter_mut().map(RoutingEntry::repair).sum()
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
