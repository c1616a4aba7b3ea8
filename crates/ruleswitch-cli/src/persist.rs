//! Writes store commits back to the rule file.

use ruleswitch_core::Rule;
use ruleswitch_store::{Persist, PersistError};
use std::path::PathBuf;

use crate::rules_file;

/// Persists each committed list to `path` in its original format.
#[derive(Debug, Clone)]
pub struct FilePersist {
    path: PathBuf,
}

impl FilePersist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Persist for FilePersist {
    fn persist(&mut self, rules: &[Rule]) -> Result<(), PersistError> {
        rules_file::save(&self.path, rules).map_err(Into::into)
    }
}
