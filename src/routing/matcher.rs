//! Domain matching logic.
//!
//! # Responsibilities
//! - Decide whether a registered domain applies to the current host
//!
//! # Design Decisions
//! - Substring containment, not equality or suffix matching: registering
//!   `example.com` covers `shop.example.com`, and also any unrelated host
//!   that merely contains the text (`notexample.com.evil.org`)
//! - Raw string comparison; callers pass hosts as reported (lowercase for
//!   hosts parsed from a URL)
//! - No regex to guarantee O(n) matching

/// Trait for matching a hostname against a registered condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if `host` matches this condition.
    fn matches(&self, host: &str) -> bool;
}

/// Matches any host containing the registered domain text.
#[derive(Debug, Clone, Copy)]
pub struct SubstringMatcher<'a> {
    domain: &'a str,
}

impl<'a> SubstringMatcher<'a> {
    pub fn new(domain: &'a str) -> Self {
        Self { domain }
    }
}

impl Matcher for SubstringMatcher<'_> {
    fn matches(&self, host: &str) -> bool {
        host.contains(self.domain)
    }
}
