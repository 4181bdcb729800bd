//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: probe, target, run_id, ...)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//!     → any `metrics` recorder the embedding program installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Run ID flows through every event of a decision run (span field)
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;
