//! Target catalog and its cache.
//!
//! The cache is a plain value owned by the host and handed to the linter as
//! data; nothing here is global.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A valid target as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier rules refer to.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
}

impl CatalogEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Source of valid targets.
pub trait TargetCatalog {
    /// Lists the targets a rule may select.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn list_valid_targets(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

/// Catalog access errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("failed to read target catalog: {0}")]
    Unavailable(String),

    /// The catalog content is malformed.
    #[error("malformed target catalog: {0}")]
    Malformed(String),
}

/// Catalog entries with the time they were fetched.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    entries: Vec<CatalogEntry>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl CatalogCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            fetched_at: None,
            ttl,
        }
    }

    /// Returns true if the cached entries are younger than the TTL at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.fetched_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.ttl)
    }

    /// Returns cached entries, refetching when stale or forced.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors; the previous entries are kept on failure.
    pub fn entries(
        &mut self,
        catalog: &dyn TargetCatalog,
        force_refresh: bool,
    ) -> Result<&[CatalogEntry], CatalogError> {
        self.entries_at(catalog, force_refresh, Instant::now())
    }

    /// Like [`Self::entries`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors; the previous entries are kept on failure.
    pub fn entries_at(
        &mut self,
        catalog: &dyn TargetCatalog,
        force_refresh: bool,
        now: Instant,
    ) -> Result<&[CatalogEntry], CatalogError> {
        if force_refresh || !self.is_fresh(now) {
            let fetched = catalog.list_valid_targets()?;
            debug!(entries = fetched.len(), force_refresh, "catalog refreshed");
            self.entries = fetched;
            self.fetched_at = Some(now);
        }
        Ok(&self.entries)
    }

    /// Drops the fetch time so the next access refetches.
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }

    /// Returns the cached entries without refreshing.
    #[must_use]
    pub fn cached(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
