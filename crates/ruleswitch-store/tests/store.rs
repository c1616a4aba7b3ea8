//! Integration test: the single-writer store applying lint fixes.

use std::sync::{Arc, Mutex};

use ruleswitch_core::{lint, IssueKind, Predicate, Rule, SuggestedFix};
use ruleswitch_store::{NoPersist, Persist, PersistError, RuleStore, StoreError};

fn rule(name: &str, predicate: Predicate, target: &str) -> Rule {
    Rule::new(name, predicate, target).unwrap()
}

fn names(rules: &[Rule]) -> Vec<&str> {
    rules.iter().map(Rule::name).collect()
}

fn sample() -> Vec<Rule> {
    vec![
        rule("ts", Predicate::new().language("typescript"), "Dark"),
        rule(
            "ts tests",
            Predicate::new()
                .language("typescript")
                .path_pattern("**/*.test.ts"),
            "Light",
        ),
        rule("ts again", Predicate::new().language("typescript"), "Dark"),
    ]
}

#[derive(Clone, Default)]
struct Recording {
    writes: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Persist for Recording {
    fn persist(&mut self, rules: &[Rule]) -> Result<(), PersistError> {
        self.writes
            .lock()
            .unwrap()
            .push(rules.iter().map(|r| r.name().to_string()).collect());
        Ok(())
    }
}

struct Failing;

impl Persist for Failing {
    fn persist(&mut self, _rules: &[Rule]) -> Result<(), PersistError> {
        Err("disk full".into())
    }
}

#[tokio::test]
async fn snapshot_starts_at_revision_zero() {
    let store = RuleStore::spawn(sample(), NoPersist);
    let snap = store.snapshot().await.unwrap();
    assert_eq!(snap.revision, 0);
    assert_eq!(snap.rules.len(), 3);
}

#[tokio::test]
async fn mutations_bump_revision_and_persist() {
    let persist = Recording::default();
    let store = RuleStore::spawn(sample(), persist.clone());

    let snap = store.move_before(1, 0, Some(0)).await.unwrap();
    assert_eq!(snap.revision, 1);
    assert_eq!(names(&snap.rules), vec!["ts tests", "ts", "ts again"]);

    let snap = store.delete_many(vec![2], Some(1)).await.unwrap();
    assert_eq!(snap.revision, 2);
    assert_eq!(names(&snap.rules), vec!["ts tests", "ts"]);

    let writes = persist.writes.lock().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[1], vec!["ts tests", "ts"]);
}

#[tokio::test]
async fn stale_revision_is_rejected() {
    let store = RuleStore::spawn(sample(), NoPersist);
    store.delete_many(vec![2], Some(0)).await.unwrap();

    let err = store.delete_many(vec![1], Some(0)).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::StaleRevision {
            expected: 0,
            actual: 1
        }
    ));
    assert_eq!(store.snapshot().await.unwrap().rules.len(), 2);
}

#[tokio::test]
async fn out_of_range_index_is_rejected() {
    let store = RuleStore::spawn(sample(), NoPersist);
    let err = store.move_before(7, 0, None).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidIndex { index: 7, len: 3 }));
    assert_eq!(store.snapshot().await.unwrap().revision, 0);
}

#[tokio::test]
async fn persist_failure_rolls_back() {
    let store = RuleStore::spawn(sample(), Failing);
    let err = store.replace_all(Vec::new(), None).await.unwrap_err();
    assert!(matches!(err, StoreError::Persist { .. }));
    let snap = store.snapshot().await.unwrap();
    assert_eq!(snap.revision, 0);
    assert_eq!(snap.rules.len(), 3);
}

#[tokio::test]
async fn lint_fixes_converge() {
    let store = RuleStore::spawn(sample(), NoPersist);

    for _ in 0..10 {
        let snap = store.snapshot().await.unwrap();
        let report = lint(&snap.rules);
        let Some(fix) = report
            .issues
            .iter()
            .filter(|i| i.kind != IssueKind::ReorderSuggestion)
            .find_map(|i| i.suggested_fix.clone())
        else {
            break;
        };
        store.apply_fix(fix, Some(snap.revision)).await.unwrap();
    }

    let snap = store.snapshot().await.unwrap();
    let report = lint(&snap.rules);
    assert!(report.by_kind(IssueKind::Duplicate).is_empty());
    assert!(report.by_kind(IssueKind::Unreachable).is_empty());
    assert_eq!(names(&snap.rules), vec!["ts tests", "ts"]);
}

#[tokio::test]
async fn concurrent_handles_are_serialized() {
    let store = RuleStore::spawn(sample(), NoPersist);
    let mut tasks = Vec::new();
    for _ in 0..3 {
        let handle = store.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .apply_fix(SuggestedFix::ReorderBefore { from: 2, to: 0 }, None)
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    let snap = store.snapshot().await.unwrap();
    assert_eq!(snap.revision, 3);
    assert_eq!(names(&snap.rules), vec!["ts", "ts tests", "ts again"]);
}
