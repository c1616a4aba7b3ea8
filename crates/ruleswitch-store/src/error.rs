//! Store errors.

/// Errors from rule store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An index does not exist in the current list.
    #[error("rule index {index} is out of range for {len} rule(s)")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// The list changed since the caller computed its indices.
    #[error("rule list is at revision {actual}, request was computed against {expected}")]
    StaleRevision {
        /// Revision the caller expected.
        expected: u64,
        /// Current revision.
        actual: u64,
    },

    /// The fix cannot be applied as described.
    #[error("invalid fix: {reason}")]
    InvalidFix {
        /// Why the fix was rejected.
        reason: String,
    },

    /// The worker has shut down.
    #[error("rule store is closed")]
    Closed,

    /// Persisting the new list failed; the list was left unchanged.
    #[error("failed to persist rule list: {source}")]
    Persist {
        /// Underlying error.
        #[source]
        source: crate::store::PersistError,
    },
}
