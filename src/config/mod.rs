//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TunnelConfig (validated, immutable)
//!     → probe configs for the decision engine
//!     → store path and redirect mode for the CLI
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run reads it exactly once
//! - All fields have defaults to allow minimal configs (or none at all)
//! - Validation separates syntactic (serde) from semantic checks
//! - User state (routing table, intranet test URL) is NOT config; it lives
//!   in the key/value store and is edited through the CLI

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::TunnelConfig;
pub use schema::{IntranetProbeConfig, Ipv6ProbeConfig, RedirectConfig, RedirectMode};
