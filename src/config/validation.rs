//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check required strings are present (IPv6 target, marker, opener)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TunnelConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::{RedirectMode, TunnelConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &TunnelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let intranet = &config.probes.intranet;
    if intranet.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "probes.intranet.timeout_ms",
            "must be greater than zero",
        ));
    }
    if intranet.default_target_url.trim().is_empty() {
        errors.push(ValidationError::new(
            "probes.intranet.default_target_url",
            "must not be empty",
        ));
    }

    let ipv6 = &config.probes.ipv6;
    if ipv6.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "probes.ipv6.timeout_ms",
            "must be greater than zero",
        ));
    }
    if ipv6.target_url.trim().is_empty() {
        errors.push(ValidationError::new("probes.ipv6.target_url", "must not be empty"));
    }
    if ipv6.no_ipv6_marker.is_empty() {
        // An empty marker is contained in every body and would fail every probe.
        errors.push(ValidationError::new(
            "probes.ipv6.no_ipv6_marker",
            "must not be empty",
        ));
    }

    if config.redirect.mode == RedirectMode::Command
        && config.redirect.command.first().map_or(true, |p| p.trim().is_empty())
    {
        errors.push(ValidationError::new(
            "redirect.command",
            "command mode requires an opener program",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
