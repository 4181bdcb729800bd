//! Key/value persistence.
//!
//! # Data Flow
//! ```text
//! AppState::load
//!     → KvStore::get("smarttunnel_whitelist")        → RoutingTable
//!     → KvStore::get("smarttunnel_intranetTestUrl")  → intranet test URL
//!
//! Every table/URL edit
//!     → KvStore::set(key, json value)
//!     → json_file.rs: rewrite file (temp + rename)
//! ```
//!
//! # Design Decisions
//! - Values are JSON; typed access goes through `KvStoreExt`
//! - A missing key is not an error, the caller supplies the default
//! - Key names match stores written by earlier versions

pub mod json_file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the routing table.
pub const ROUTING_TABLE_KEY: &str = "smarttunnel_whitelist";

/// Key holding the intranet test URL.
pub const INTRANET_TEST_URL_KEY: &str = "smarttunnel_intranetTestUrl";

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error reading or writing the store file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored value has the wrong shape for its key.
    #[error("invalid value for key '{key}': {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Minimal key/value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Typed helpers over any `KvStore`.
pub trait KvStoreExt: KvStore {
    /// Read `key`, returning `default` when it is absent.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value).map_err(|source| {
                StorageError::InvalidValue {
                    key: key.to_string(),
                    source,
                }
            }),
            None => Ok(default),
        }
    }

    fn set_typed<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
