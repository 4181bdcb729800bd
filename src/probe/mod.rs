//! Reachability probing subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (kind + target + timeout)
//!     → transport.rs (single GET with deadline)
//!     → ProbeKind::accepts (status / body criterion)
//!     → bool: reachable or not
//! ```
//!
//! # Design Decisions
//! - A probe is one best-effort attempt: no retries
//! - Every failure (timeout, connect error, bad URL, wrong status) is `false`
//! - Failures are logged and counted, never returned as errors
//! - Probes hold no shared state; the transport is borrowed per call

pub mod transport;

use std::time::{Duration, Instant};

use crate::observability::metrics;
pub use transport::{HttpTransport, ProbeError, ProbeResponse, Transport};

/// Target and deadline of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub target_url: String,
    pub timeout: Duration,
}

impl ProbeConfig {
    pub fn new(target_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target_url: target_url.into(),
            timeout,
        }
    }
}

/// Which environment a probe detects, and how it judges a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeKind {
    /// Reachable iff the internal resource answers 200.
    Intranet,
    /// Reachable iff the test endpoint answers 200 with a body that does not
    /// contain `no_address_marker`. The endpoint answers 200 either way.
    Ipv6 { no_address_marker: String },
}

impl ProbeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::Intranet => "intranet",
            ProbeKind::Ipv6 { .. } => "ipv6",
        }
    }

    fn reads_body(&self) -> bool {
        matches!(self, ProbeKind::Ipv6 { .. })
    }

    /// Apply this kind's success criterion to a response.
    pub fn accepts(&self, response: &ProbeResponse) -> bool {
        if response.status != 200 {
            return false;
        }
        match self {
            ProbeKind::Intranet => true,
            ProbeKind::Ipv6 { no_address_marker } => {
                !response.body.is_empty() && !response.body.contains(no_address_marker.as_str())
            }
        }
    }
}

/// A configured reachability check.
#[derive(Debug, Clone)]
pub struct Probe {
    kind: ProbeKind,
    config: ProbeConfig,
}

impl Probe {
    pub fn new(kind: ProbeKind, config: ProbeConfig) -> Self {
        Self { kind, config }
    }

    pub fn intranet(config: ProbeConfig) -> Self {
        Self::new(ProbeKind::Intranet, config)
    }

    pub fn ipv6(config: ProbeConfig, no_address_marker: impl Into<String>) -> Self {
        Self::new(
            ProbeKind::Ipv6 {
                no_address_marker: no_address_marker.into(),
            },
            config,
        )
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run the probe once. Never fails: any problem means unreachable.
    pub async fn check<T: Transport>(&self, transport: &T) -> bool {
        let name = self.kind.name();
        let target = &self.config.target_url;
        let started = Instant::now();

        let result = transport
            .get(target, self.config.timeout, self.kind.reads_body())
            .await;

        let reachable = match result {
            Ok(response) => {
                let accepted = self.kind.accepts(&response);
                if !accepted {
                    tracing::warn!(
                        probe = name,
                        url = %target,
                        status = response.status,
                        "Probe failed: response rejected"
                    );
                }
                accepted
            }
            Err(ProbeError::Timeout(_)) => {
                tracing::warn!(
                    probe = name,
                    url = %target,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Probe failed: timeout"
                );
                false
            }
            Err(e) => {
                tracing::warn!(probe = name, url = %target, error = %e, "Probe failed");
                false
            }
        };

        tracing::debug!(probe = name, reachable, elapsed = ?started.elapsed(), "Probe finished");
        metrics::record_probe(name, reachable, started);
        reachable
    }
}
