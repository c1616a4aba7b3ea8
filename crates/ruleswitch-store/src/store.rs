//! The single-writer worker and its handle.

use ruleswitch_core::{Rule, SuggestedFix};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::ops;
use crate::StoreError;

/// Boxed error returned by a [`Persist`] implementation.
pub type PersistError = Box<dyn std::error::Error + Send + Sync>;

/// Queue depth before senders wait.
const QUEUE_CAPACITY: usize = 64;

/// Writes a committed rule list somewhere durable.
///
/// Runs on the worker's blocking thread, so plain synchronous I/O is fine.
pub trait Persist: Send + 'static {
    /// Persists the full list.
    ///
    /// # Errors
    ///
    /// A failure rolls the mutation back.
    fn persist(&mut self, rules: &[Rule]) -> Result<(), PersistError>;
}

/// Keeps the list in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersist;

impl Persist for NoPersist {
    fn persist(&mut self, _rules: &[Rule]) -> Result<(), PersistError> {
        Ok(())
    }
}

/// The list at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Incremented by every committed mutation.
    pub revision: u64,
    /// Rules in priority order.
    pub rules: Vec<Rule>,
}

#[derive(Debug)]
enum Mutation {
    DeleteMany(Vec<usize>),
    MoveBefore { from: usize, to: usize },
    ReplaceAll(Vec<Rule>),
    ApplyFix(SuggestedFix),
}

impl Mutation {
    fn apply(self, rules: &mut Vec<Rule>) -> Result<(), StoreError> {
        match self {
            Self::DeleteMany(indices) => ops::delete_many(rules, &indices),
            Self::MoveBefore { from, to } => ops::move_before(rules, from, to),
            Self::ReplaceAll(list) => {
                *rules = list;
                Ok(())
            }
            Self::ApplyFix(fix) => ops::apply_fix(rules, &fix),
        }
    }
}

enum Command {
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
    Mutate {
        mutation: Mutation,
        expected_revision: Option<u64>,
        reply: oneshot::Sender<Result<Snapshot, StoreError>>,
    },
}

/// Handle to a rule list owned by a single worker.
///
/// Clones share the same worker; requests are served in arrival order. The
/// worker stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct RuleStore {
    tx: mpsc::Sender<Command>,
}

impl RuleStore {
    /// Starts the worker with an initial list at revision 0.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(initial: Vec<Rule>, persist: impl Persist) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let worker = Worker {
            rules: initial,
            revision: 0,
            persist,
        };
        info!(rules = worker.rules.len(), "rule store started");
        tokio::task::spawn_blocking(move || worker.run(rx));
        Self { tx }
    }

    /// Returns the current list and revision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the worker has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    /// Deletes the rules at `indices`.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range indices, a stale `expected_revision`, a persist
    /// failure, or a closed store.
    pub async fn delete_many(
        &self,
        indices: Vec<usize>,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        self.mutate(Mutation::DeleteMany(indices), expected_revision)
            .await
    }

    /// Moves rule `from` immediately before rule `to`.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range indices, a stale `expected_revision`, a persist
    /// failure, or a closed store.
    pub async fn move_before(
        &self,
        from: usize,
        to: usize,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        self.mutate(Mutation::MoveBefore { from, to }, expected_revision)
            .await
    }

    /// Replaces the whole list.
    ///
    /// # Errors
    ///
    /// Fails on a stale `expected_revision`, a persist failure, or a closed
    /// store.
    pub async fn replace_all(
        &self,
        rules: Vec<Rule>,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        self.mutate(Mutation::ReplaceAll(rules), expected_revision)
            .await
    }

    /// Applies a lint fix computed against `expected_revision`.
    ///
    /// # Errors
    ///
    /// Fails on an inapplicable fix, a stale `expected_revision`, a persist
    /// failure, or a closed store.
    pub async fn apply_fix(
        &self,
        fix: SuggestedFix,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        self.mutate(Mutation::ApplyFix(fix), expected_revision)
            .await
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Mutate {
                mutation,
                expected_revision,
                reply,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)?
    }
}

struct Worker<P> {
    rules: Vec<Rule>,
    revision: u64,
    persist: P,
}

impl<P: Persist> Worker<P> {
    fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        while let Some(command) = rx.blocking_recv() {
            match command {
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                Command::Mutate {
                    mutation,
                    expected_revision,
                    reply,
                } => {
                    let result = self.mutate(mutation, expected_revision);
                    let _ = reply.send(result);
                }
            }
        }
        debug!(revision = self.revision, "rule store stopped");
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            rules: self.rules.clone(),
        }
    }

    fn mutate(
        &mut self,
        mutation: Mutation,
        expected_revision: Option<u64>,
    ) -> Result<Snapshot, StoreError> {
        if let Some(expected) = expected_revision {
            if expected != self.revision {
                debug!(expected, actual = self.revision, "rejecting stale request");
                return Err(StoreError::StaleRevision {
                    expected,
                    actual: self.revision,
                });
            }
        }

        let mut next = self.rules.clone();
        debug!(?mutation, revision = self.revision, "applying mutation");
        mutation.apply(&mut next)?;

        if let Err(source) = self.persist.persist(&next) {
            warn!(error = %source, "persist failed, mutation rolled back");
            return Err(StoreError::Persist { source });
        }
        self.rules = next;
        self.revision += 1;
        Ok(self.snapshot())
    }
}
