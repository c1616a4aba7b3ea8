//! # ruleswitch-store
//!
//! Owns a rule list and serializes every mutation through one writer.
//!
//! Callers hold a cheap, clonable [`RuleStore`] handle. Requests travel over
//! a FIFO channel to a single worker that owns the list, applies the change,
//! persists it and replies with the new [`Snapshot`]. Indices are never
//! reinterpreted: an out-of-range index fails with
//! [`StoreError::InvalidIndex`], and a caller that passes the revision its
//! indices were computed against gets [`StoreError::StaleRevision`] once the
//! list has moved on.
//!
//! ## Example
//!
//! ```ignore
//! use ruleswitch_store::{NoPersist, RuleStore};
//!
//! let store = RuleStore::spawn(rules, NoPersist);
//! let snapshot = store.snapshot().await?;
//! let report = ruleswitch_core::lint(&snapshot.rules);
//! if let Some(fix) = report.issues.iter().find_map(|i| i.suggested_fix.clone()) {
//!     store.apply_fix(fix, Some(snapshot.revision)).await?;
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod ops;
mod store;

pub use error::StoreError;
pub use store::{NoPersist, Persist, PersistError, RuleStore, Snapshot};
