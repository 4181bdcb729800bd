//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Current host
//!     → table.rs (scan entries in order)
//!     → matcher.rs (substring condition per entry)
//!     → Return: matched RoutingEntry or None
//!
//! Entry creation / repair:
//!     raw site URL
//!     → normalize.rs (ensure http/https/ftp scheme)
//!     → stored in RoutingTable
//! ```
//!
//! # Design Decisions
//! - Table owned by the application state, read-only during a decision run
//! - Deterministic: same table and host always match the same entry
//! - First match wins (table order)

pub mod matcher;
pub mod normalize;
pub mod table;

pub use normalize::normalize;
pub use table::{RoutingEntry, RoutingTable};
