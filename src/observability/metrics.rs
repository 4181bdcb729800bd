//! Metrics collection.
//!
//! # Responsibilities
//! - Define tunnel metrics (probe outcomes, decisions, table edits)
//! - Keep call sites free of metric names and label plumbing
//!
//! # Metrics
//! - `tunnel_probe_total` (counter): probes by kind and outcome
//! - `tunnel_probe_duration_seconds` (histogram): probe latency by kind
//! - `tunnel_decisions_total` (counter): decision runs by resolution
//! - `tunnel_table_mutations_total` (counter): routing table edits by operation
//!
//! # Design Decisions
//! - Goes through the `metrics` facade; with no recorder installed (the CLI
//!   installs none) every call is a no-op
//! - Labels are static strings only

use std::time::Instant;

pub fn record_probe(kind: &'static str, reachable: bool, started: Instant) {
    let outcome = if reachable { "reachable" } else { "unreachable" };
    metrics::counter!("tunnel_probe_total", "probe" => kind, "outcome" => outcome).increment(1);
    metrics::histogram!("tunnel_probe_duration_seconds", "probe" => kind)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_decision(resolution: &'static str) {
    metrics::counter!("tunnel_decisions_total", "resolution" => resolution).increment(1);
}

pub fn record_table_mutation(operation: &'static str) {
    metrics::counter!("tunnel_table_mutations_total", "operation" => operation).increment(1);
}
