//! Routing decision subsystem.
//!
//! # Data Flow
//! ```text
//! RoutingTable + current host
//!     → routing lookup (first substring match)
//!     → engine.rs: intranet probe, then IPv6 probe
//!     → Decision { result, resolution }
//!     → redirect executor
//! ```
//!
//! # Design Decisions
//! - One run per invocation, not a monitor
//! - The result is the only output; nothing is persisted

pub mod engine;

use std::fmt;

pub use engine::DecisionEngine;

/// What the redirect executor should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionResult {
    Redirect(String),
    NoAction,
}

/// Why a run ended the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No routing entry matched the host; no probe was issued.
    Unregistered,
    /// The intranet probe succeeded.
    Intranet,
    /// The intranet probe failed and the IPv6 probe succeeded.
    Ipv6,
    /// Both probes failed.
    Unreachable,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Unregistered => "unregistered",
            Resolution::Intranet => "intranet",
            Resolution::Ipv6 => "ipv6",
            Resolution::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one decision run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub result: DecisionResult,
    pub resolution: Resolution,
    /// Domain of the matched entry, if any.
    pub domain: Option<String>,
}
