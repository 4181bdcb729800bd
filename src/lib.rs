//! SmartTunnel: network-environment aware redirect routing.
//!
//! Decides, for the site currently being visited, whether the user is on an
//! intranet, has public IPv6, or neither, and picks the alternate site
//! registered for that domain.

pub mod config;
pub mod decision;
pub mod observability;
pub mod probe;
pub mod redirect;
pub mod routing;
pub mod state;
pub mod storage;

pub use config::TunnelConfig;
pub use decision::{Decision, DecisionEngine, DecisionResult, Resolution};
pub use routing::{RoutingEntry, RoutingTable};
pub use state::AppState;
