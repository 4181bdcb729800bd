//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tunnel.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default target for the intranet probe until the user configures one.
pub const DEFAULT_INTRANET_TEST_URL: &str = "http://intranet-test-resource/";

/// Public endpoint that reports whether the client has an IPv6 address.
pub const DEFAULT_IPV6_TEST_URL: &str = "https://ipv6.lookup.test-ipv6.com/ip/";

/// Text the IPv6 endpoint returns (with status 200) when no address was seen.
pub const DEFAULT_NO_IPV6_MARKER: &str = "No IPv6 address detected";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TunnelConfig {
    /// Probe targets and timeouts.
    pub probes: ProbesConfig,

    /// Where the routing table lives.
    pub storage: StorageConfig,

    /// How a resolved redirect is carried out.
    pub redirect: RedirectConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings for both probes.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbesConfig {
    pub intranet: IntranetProbeConfig,
    pub ipv6: Ipv6ProbeConfig,
}

/// Intranet probe configuration.
///
/// The target URL itself is user state and lives in the key/value store;
/// `default_target_url` only seeds it when nothing has been stored yet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntranetProbeConfig {
    /// Fallback target when the store holds none.
    pub default_target_url: String,

    /// Probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl IntranetProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for IntranetProbeConfig {
    fn default() -> Self {
        Self {
            default_target_url: DEFAULT_INTRANET_TEST_URL.to_string(),
            timeout_ms: 2000,
        }
    }
}

/// IPv6 probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Ipv6ProbeConfig {
    /// IPv6 capability test endpoint.
    pub target_url: String,

    /// Probe timeout in milliseconds. Longer than the intranet one since
    /// the request crosses the public internet.
    pub timeout_ms: u64,

    /// Body text meaning "reachable, but no IPv6 address".
    pub no_ipv6_marker: String,
}

impl Ipv6ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Ipv6ProbeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_IPV6_TEST_URL.to_string(),
            timeout_ms: 3000,
            no_ipv6_marker: DEFAULT_NO_IPV6_MARKER.to_string(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON store file. `None` uses the platform data directory.
    pub path: Option<PathBuf>,
}

/// How navigation is performed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMode {
    /// Print the target URL on stdout.
    #[default]
    Print,
    /// Hand the target URL to an opener command.
    Command,
}

/// Redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    pub mode: RedirectMode,

    /// Opener program and leading arguments, used in `command` mode.
    /// The target URL is appended as the last argument.
    pub command: Vec<String>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            mode: RedirectMode::Print,
            command: vec![default_opener().to_string()],
        }
    }
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
