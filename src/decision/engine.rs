//! Priority-ordered decision run.
//!
//! # State Machine
//! ```text
//! Start ──(no entry)──────────────────────────▶ Resolved(NoAction)
//!   │
//!   ▼
//! CheckingIntranet ──(reachable)──────────────▶ Resolved(Redirect(intranet_site))
//!   │ (unreachable)
//!   ▼
//! CheckingIPv6 ──(reachable)──────────────────▶ Resolved(Redirect(ipv6_site))
//!   │ (unreachable)
//!   ▼
//! Resolved(NoAction)
//! ```
//!
//! # Design Decisions
//! - Written as straight-line async code: the two awaits are the only
//!   suspension points, and the IPv6 probe is only issued after the
//!   intranet probe has resolved
//! - Intranet wins whenever it is reachable, regardless of IPv6
//! - A tier whose site is blank is skipped without probing
//! - A run never fails; the worst case is NoAction

use tracing::Instrument;
use uuid::Uuid;

use crate::config::TunnelConfig;
use crate::decision::{Decision, DecisionResult, Resolution};
use crate::observability::metrics;
use crate::probe::{Probe, ProbeConfig, Transport};
use crate::routing::RoutingTable;

/// Runs the intranet and IPv6 probes for a matched routing entry.
#[derive(Debug)]
pub struct DecisionEngine<T> {
    transport: T,
    intranet: Probe,
    ipv6: Probe,
}

impl<T: Transport> DecisionEngine<T> {
    pub fn new(transport: T, intranet: Probe, ipv6: Probe) -> Self {
        Self {
            transport,
            intranet,
            ipv6,
        }
    }

    /// Build the engine from configuration and the user's intranet test URL.
    pub fn from_config(transport: T, config: &TunnelConfig, intranet_test_url: &str) -> Self {
        let intranet = Probe::intranet(ProbeConfig::new(
            intranet_test_url,
            config.probes.intranet.timeout(),
        ));
        let ipv6 = Probe::ipv6(
            ProbeConfig::new(
                config.probes.ipv6.target_url.clone(),
                config.probes.ipv6.timeout(),
            ),
            config.probes.ipv6.no_ipv6_marker.clone(),
        );
        Self::new(transport, intranet, ipv6)
    }

    pub fn intranet_probe(&self) -> &Probe {
        &self.intranet
    }

    pub fn ipv6_probe(&self) -> &Probe {
        &self.ipv6
    }

    /// Perform one decision run for `host`.
    pub async fn decide(&self, table: &RoutingTable, host: &str) -> Decision {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("decision", %run_id, host = %host);
        let decision = self.run(table, host).instrument(span).await;
        metrics::record_decision(decision.resolution.as_str());
        decision
    }

    async fn run(&self, table: &RoutingTable, host: &str) -> Decision {
        let Some(entry) = table.find_match(host) else {
            tracing::info!("Host not registered, no redirect");
            return Decision::no_action(Resolution::Unregistered, None);
        };
        let domain = Some(entry.domain.clone());

        tracing::debug!(domain = %entry.domain, "Checking intranet environment");
        if !entry.intranet_site.is_empty() && self.intranet.check(&self.transport).await {
            tracing::info!(destination = %entry.intranet_site, "Intranet detected, redirecting to intranet site");
            return Decision::redirect(entry.intranet_site.clone(), Resolution::Intranet, domain);
        }

        tracing::debug!(domain = %entry.domain, "Checking IPv6 connectivity");
        if !entry.ipv6_site.is_empty() && self.ipv6.check(&self.transport).await {
            tracing::info!(destination = %entry.ipv6_site, "IPv6 detected, redirecting to IPv6 site");
            return Decision::redirect(entry.ipv6_site.clone(), Resolution::Ipv6, domain);
        }

        tracing::info!("Neither intranet nor IPv6 available, staying on current page");
        Decision::no_action(Resolution::Unreachable, domain)
    }
}

impl Decision {
    fn redirect(url: String, resolution: Resolution, domain: Option<String>) -> Self {
        Self {
            result: DecisionResult::Redirect(url),
            resolution,
            domain,
        }
    }

    fn no_action(resolution: Resolution, domain: Option<String>) -> Self {
        Self {
            result: DecisionResult::NoAction,
            resolution,
            domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::testing::ScriptedTransport;
    use crate::probe::ProbeError;
    use crate::routing::RoutingEntry;
    use std::time::Duration;

    const INTRANET_TEST: &str = "http://intranet-test-resource/";
    const IPV6_TEST: &str = "https://ipv6.lookup.test-ipv6.com/ip/";

    fn table() -> RoutingTable {
        RoutingTable::new(vec![RoutingEntry::new(
            "example.com",
            "https://ipv6.example.com",
            "http://intranet.example.com",
        )])
    }

    fn engine(transport: &ScriptedTransport) -> DecisionEngine<&ScriptedTransport> {
        DecisionEngine::from_config(transport, &TunnelConfig::default(), INTRANET_TEST)
    }

    #[tokio::test]
    async fn test_intranet_reachable_redirects_to_intranet() {
        let transport = ScriptedTransport::new().respond(INTRANET_TEST, 200, "");
        let decision = engine(&transport).decide(&table(), "shop.example.com").await;

        assert_eq!(
            decision.result,
            DecisionResult::Redirect("http://intranet.example.com".into())
        );
        assert_eq!(decision.resolution, Resolution::Intranet);
        assert_eq!(decision.domain.as_deref(), Some("example.com"));
        // IPv6 is never consulted once the intranet answered.
        assert_eq!(transport.requested_urls(), vec![INTRANET_TEST]);
    }

    #[tokio::test]
    async fn test_intranet_wins_when_both_reachable() {
        let transport = ScriptedTransport::new()
            .respond(INTRANET_TEST, 200, "")
            .respond(IPV6_TEST, 200, "2001:db8::1");
        let decision = engine(&transport).decide(&table(), "example.com").await;
        assert_eq!(
            decision.result,
            DecisionResult::Redirect("http://intranet.example.com".into())
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_ipv6() {
        let transport = ScriptedTransport::new()
            .fail(INTRANET_TEST, ProbeError::Timeout(Duration::from_millis(2000)))
            .respond(IPV6_TEST, 200, "2001:db8::1");
        let decision = engine(&transport).decide(&table(), "shop.example.com").await;

        assert_eq!(
            decision.result,
            DecisionResult::Redirect("https://ipv6.example.com".into())
        );
        assert_eq!(decision.resolution, Resolution::Ipv6);
        assert_eq!(transport.requested_urls(), vec![INTRANET_TEST, IPV6_TEST]);
    }

    #[tokio::test]
    async fn test_both_unreachable_is_no_action() {
        let transport = ScriptedTransport::new()
            .respond(INTRANET_TEST, 404, "")
            .respond(IPV6_TEST, 200, "No IPv6 address detected");
        let decision = engine(&transport).decide(&table(), "shop.example.com").await;

        assert_eq!(decision.result, DecisionResult::NoAction);
        assert_eq!(decision.resolution, Resolution::Unreachable);
    }

    #[tokio::test]
    async fn test_unregistered_host_issues_no_probe() {
        let transport = ScriptedTransport::new()
            .respond(INTRANET_TEST, 200, "")
            .respond(IPV6_TEST, 200, "2001:db8::1");
        let decision = engine(&transport).decide(&table(), "example.org").await;

        assert_eq!(decision.result, DecisionResult::NoAction);
        assert_eq!(decision.resolution, Resolution::Unregistered);
        assert!(decision.domain.is_none());
        assert!(transport.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_site_tier_is_skipped() {
        let transport = ScriptedTransport::new()
            .respond(INTRANET_TEST, 200, "")
            .respond(IPV6_TEST, 200, "2001:db8::1");
        let table = RoutingTable::new(vec![RoutingEntry {
            domain: "example.com".into(),
            ipv6_site: "https://ipv6.example.com".into(),
            intranet_site: String::new(),
        }]);
        let decision = engine(&transport).decide(&table, "example.com").await;

        assert_eq!(
            decision.result,
            DecisionResult::Redirect("https://ipv6.example.com".into())
        );
        assert_eq!(transport.requested_urls(), vec![IPV6_TEST]);

        let table = RoutingTable::new(vec![RoutingEntry {
            domain: "example.com".into(),
            ipv6_site: String::new(),
            intranet_site: String::new(),
        }]);
        let transport = ScriptedTransport::new().respond(IPV6_TEST, 200, "2001:db8::1");
        let decision = engine(&transport).decide(&table, "example.com").await;
        assert_eq!(decision.result, DecisionResult::NoAction);
        assert_eq!(decision.resolution, Resolution::Unreachable);
        assert!(transport.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_uses_configured_intranet_url() {
        let transport = ScriptedTransport::new().respond("http://10.0.0.1/ping", 200, "");
        let engine =
            DecisionEngine::from_config(&transport, &TunnelConfig::default(), "http://10.0.0.1/ping");
        let decision = engine.decide(&table(), "example.com").await;

        assert_eq!(decision.resolution, Resolution::Intranet);
        assert_eq!(engine.intranet_probe().config().timeout, Duration::from_millis(2000));
        assert_eq!(engine.ipv6_probe().config().timeout, Duration::from_millis(3000));
    }
}
