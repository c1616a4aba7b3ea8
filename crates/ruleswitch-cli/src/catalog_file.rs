//! Target catalog backed by a JSON file.

use ruleswitch_core::{CatalogEntry, CatalogError, TargetCatalog};
use std::path::PathBuf;

/// Reads `[{ "id": "...", "label": "..." }]` from disk on every fetch.
///
/// Pair it with [`ruleswitch_core::CatalogCache`] to avoid rereading.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TargetCatalog for FileCatalog {
    fn list_valid_targets(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&content)
            .map_err(|e| CatalogError::Malformed(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(
            "Read {} target(s) from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }
}
