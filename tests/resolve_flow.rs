//! End-to-end decision runs: file store → state → engine → redirect.

use std::sync::Mutex;

use smart_tunnel::config::TunnelConfig;
use smart_tunnel::redirect::{self, Navigator, RedirectError};
use smart_tunnel::storage::JsonFileStore;
use smart_tunnel::{AppState, DecisionEngine, DecisionResult, Resolution};

mod common;

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    async fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

fn registered_state(dir: &tempfile::TempDir, intranet_test_url: &str) -> AppState<JsonFileStore> {
    let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    let mut state = AppState::load(store, "http://intranet-test-resource/").unwrap();
    state
        .add_site("example.com", "https://ipv6.example.com", "intranet.example.com")
        .unwrap();
    state.set_intranet_test_url(intranet_test_url).unwrap();

    // Decision runs read state loaded fresh from disk.
    let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    AppState::load(store, "http://intranet-test-resource/").unwrap()
}

fn config_with_ipv6_target(url: String) -> TunnelConfig {
    let mut config = TunnelConfig::default();
    config.probes.intranet.timeout_ms = 500;
    config.probes.ipv6.target_url = url;
    config.probes.ipv6.timeout_ms = 1000;
    config
}

#[tokio::test]
async fn test_intranet_route_wins() {
    let intranet = common::start_mock_backend(200, "ok").await;
    let ipv6 = common::start_mock_backend(200, "2001:db8::1").await;
    let dir = tempfile::tempdir().unwrap();
    let state = registered_state(&dir, &format!("http://{intranet}/"));

    let config = config_with_ipv6_target(format!("http://{ipv6}/ip/"));
    let engine = DecisionEngine::from_config(common::transport(), &config, state.intranet_test_url());
    let decision = engine.decide(state.table(), "shop.example.com").await;

    assert_eq!(decision.resolution, Resolution::Intranet);
    // Stored without a scheme, normalized on add.
    assert_eq!(
        decision.result,
        DecisionResult::Redirect("http://intranet.example.com".into())
    );

    let navigator = RecordingNavigator::default();
    assert!(redirect::execute(&decision.result, &navigator).await.unwrap());
    assert_eq!(*navigator.visited.lock().unwrap(), vec!["http://intranet.example.com"]);
}

#[tokio::test]
async fn test_ipv6_route_when_intranet_down() {
    let intranet = common::closed_addr().await;
    let ipv6 = common::start_mock_backend(200, "{\"ip\":\"2001:db8::1\"}").await;
    let dir = tempfile::tempdir().unwrap();
    let state = registered_state(&dir, &format!("http://{intranet}/"));

    let config = config_with_ipv6_target(format!("http://{ipv6}/ip/"));
    let engine = DecisionEngine::from_config(common::transport(), &config, state.intranet_test_url());
    let decision = engine.decide(state.table(), "shop.example.com").await;

    assert_eq!(decision.resolution, Resolution::Ipv6);
    assert_eq!(
        decision.result,
        DecisionResult::Redirect("https://ipv6.example.com".into())
    );
}

#[tokio::test]
async fn test_no_route_keeps_page() {
    let intranet = common::start_mock_backend(503, "").await;
    let ipv6 = common::start_mock_backend(200, "No IPv6 address detected").await;
    let dir = tempfile::tempdir().unwrap();
    let state = registered_state(&dir, &format!("http://{intranet}/"));

    let config = config_with_ipv6_target(format!("http://{ipv6}/ip/"));
    let engine = DecisionEngine::from_config(common::transport(), &config, state.intranet_test_url());
    let decision = engine.decide(state.table(), "shop.example.com").await;
    assert_eq!(decision.resolution, Resolution::Unreachable);

    let navigator = RecordingNavigator::default();
    assert!(!redirect::execute(&decision.result, &navigator).await.unwrap());
    assert!(navigator.visited.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unregistered_host_after_removal() {
    let intranet = common::start_mock_backend(200, "ok").await;
    let dir = tempfile::tempdir().unwrap();
    let mut state = registered_state(&dir, &format!("http://{intranet}/"));
    assert_eq!(state.remove_site("www.example.com").unwrap(), 1);

    let config = TunnelConfig::default();
    let engine = DecisionEngine::from_config(common::transport(), &config, state.intranet_test_url());
    let decision = engine.decide(state.table(), "www.example.com").await;

    assert_eq!(decision.resolution, Resolution::Unregistered);
    assert_eq!(decision.result, DecisionResult::NoAction);
}
