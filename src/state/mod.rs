//! Application state.
//!
//! # Responsibilities
//! - Own the routing table and the intranet test URL for one process
//! - Load both from the key/value store once, at start
//! - Apply the editing commands and persist after every change
//!
//! # Design Decisions
//! - Explicit holder passed around, no process-wide globals
//! - Persist-on-write: an edit reaches memory only once the store accepted
//!   it, so a failed write leaves both unchanged
//! - Editing never runs during a decision; the engine only borrows the table

use crate::observability::metrics;
use crate::routing::{RoutingEntry, RoutingTable};
use crate::storage::{
    self, KvStore, KvStoreExt, StorageError, INTRANET_TEST_URL_KEY, ROUTING_TABLE_KEY,
};

/// Errors from editing commands.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("site {0} is already registered")]
    AlreadyRegistered(String),

    #[error("domain must not be empty")]
    EmptyDomain,

    #[error("invalid selection {index}: table has {len} entries")]
    InvalidSelection { index: usize, len: usize },

    #[error("URL must not be empty")]
    EmptyUrl,
}

pub type Result<T> = std::result::Result<T, StateError>;

/// Routing table and intranet test URL, bound to their store.
#[derive(Debug)]
pub struct AppState<S> {
    store: S,
    table: RoutingTable,
    intranet_test_url: String,
}

impl<S: KvStore> AppState<S> {
    /// Load state from `store`, using `default_intranet_test_url` when the
    /// store has none.
    pub fn load(store: S, default_intranet_test_url: &str) -> storage::Result<Self> {
        let table: RoutingTable = store.get_or(ROUTING_TABLE_KEY, RoutingTable::default())?;
        let intranet_test_url =
            store.get_or(INTRANET_TEST_URL_KEY, default_intranet_test_url.to_string())?;

        tracing::debug!(
            entries = table.len(),
            intranet_test_url = %intranet_test_url,
            "Application state loaded"
        );

        Ok(Self {
            store,
            table,
            intranet_test_url,
        })
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        self.table.entries()
    }

    pub fn intranet_test_url(&self) -> &str {
        &self.intranet_test_url
    }

    /// Register `domain` with its two destinations. Both URLs are
    /// normalized before storing.
    pub fn add_site(
        &mut self,
        domain: &str,
        ipv6_site: &str,
        intranet_site: &str,
    ) -> Result<&RoutingEntry> {
        if domain.is_empty() {
            return Err(StateError::EmptyDomain);
        }
        if ipv6_site.trim().is_empty() || intranet_site.trim().is_empty() {
            return Err(StateError::EmptyUrl);
        }
        if self.table.contains_domain(domain) {
            return Err(StateError::AlreadyRegistered(domain.to_string()));
        }

        let entry = RoutingEntry::new(domain, ipv6_site, intranet_site);
        let mut table = self.table.clone();
        table.push(entry);
        self.commit_table(table, "add")?;

        let entry = &self.table.entries()[self.table.len() - 1];
        tracing::info!(
            domain = %entry.domain,
            ipv6_site = %entry.ipv6_site,
            intranet_site = %entry.intranet_site,
            "Site registered"
        );
        Ok(entry)
    }

    /// Remove every entry matching `host`. Returns how many were removed.
    pub fn remove_site(&mut self, host: &str) -> Result<usize> {
        let mut table = self.table.clone();
        let removed = table.remove_matching(host);
        self.commit_table(table, "remove")?;
        tracing::info!(host = %host, removed, "Sites removed");
        Ok(removed)
    }

    /// Remove the entry at 0-based `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<RoutingEntry> {
        let len = self.table.len();
        let mut table = self.table.clone();
        let entry = table
            .remove_at(index)
            .ok_or(StateError::InvalidSelection { index, len })?;
        self.commit_table(table, "delete")?;
        tracing::info!(domain = %entry.domain, index, "Site deleted");
        Ok(entry)
    }

    /// Change the URL the intranet probe targets. Stored as given.
    pub fn set_intranet_test_url(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(StateError::EmptyUrl);
        }
        self.store.set_typed(INTRANET_TEST_URL_KEY, url)?;
        self.intranet_test_url = url.to_string();
        tracing::info!(url = %url, "Intranet test URL updated");
        Ok(())
    }

    /// Re-normalize every stored site URL. Returns how many were fixed.
    pub fn repair_urls(&mut self) -> Result<usize> {
        let mut table = self.table.clone();
        let fixed = table.repair();
        self.commit_table(table, "repair")?;
        tracing::info!(fixed, "Site URLs repaired");
        Ok(fixed)
    }

    /// Persist `table`, then make it the in-memory table.
    fn commit_table(&mut self, table: RoutingTable, operation: &'static str) -> Result<()> {
        self.store.set_typed(ROUTING_TABLE_KEY, &table)?;
        self.table = table;
        metrics::record_table_mutation(operation);
        Ok(())
    }
}
