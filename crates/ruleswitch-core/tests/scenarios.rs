//! End-to-end scenarios: TOML fixture → rules → evaluate / lint.

use ruleswitch_core::ruleset;
use ruleswitch_core::{
    can_both_match, evaluate, lint, Confidence, ContextSnapshot, IssueKind, Rule, Severity,
    SuggestedFix,
};
use std::path::PathBuf;

fn fixture(name: &str) -> Vec<Rule> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let content = std::fs::read_to_string(&path).expect("fixture should exist");
    ruleset::load_rules_from_toml(&content).expect("fixture rules should load")
}

// ── Scenario A: broad rule first swallows the narrow one ──

#[test]
fn broad_rule_first_makes_narrow_rule_unreachable() {
    let rules = fixture("scenario_a.toml");
    let report = lint(&rules);

    let unreachable = report.by_kind(IssueKind::Unreachable);
    assert_eq!(unreachable.len(), 1, "{:#?}", report.issues);
    assert_eq!(unreachable[0].subject_index, 1);
    assert_eq!(unreachable[0].related_indices, vec![0]);
    assert_eq!(unreachable[0].confidence, Confidence::Exact);
    assert_eq!(
        unreachable[0].suggested_fix,
        Some(SuggestedFix::ReorderBefore { from: 1, to: 0 })
    );

    let ctx = ContextSnapshot::new()
        .with_language("typescript")
        .with_file_path("src/x.test.ts");
    let outcome = evaluate(&rules, &ctx);
    assert_eq!(outcome.rule_index, Some(0));
    assert_eq!(outcome.target.as_deref(), Some("Dark"));
}

// ── Scenario B: disjoint directories ──

#[test]
fn disjoint_directories_are_clean() {
    let rules = fixture("scenario_b.toml");
    let report = lint(&rules);
    assert!(report.issues.is_empty(), "{:#?}", report.issues);
    assert_eq!(report.rules_checked, 2);
}

// ── Scenario C: timer rules ──

#[test]
fn timer_rule_fires_only_on_its_pass() {
    let rules = fixture("scenario_c.toml");
    assert!(!evaluate(&rules, &ContextSnapshot::new()).matched);

    let fired = evaluate(&rules, &ContextSnapshot::new().timer_pass([0]));
    assert!(fired.matched);
    assert_eq!(fired.target.as_deref(), Some("A"));
}

// ── Scenario D: exact duplicates ──

#[test]
fn exact_duplicate_reported_once() {
    let rules = fixture("scenario_d.toml");
    let report = lint(&rules);
    assert_eq!(report.issues.len(), 1, "{:#?}", report.issues);
    let issue = &report.issues[0];
    assert_eq!(issue.kind, IssueKind::Duplicate);
    assert_eq!(issue.subject_index, 1);
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.suggested_fix, Some(SuggestedFix::Delete { indices: vec![1] }));
}

#[test]
fn duplicate_report_renders() {
    let rules = fixture("scenario_d.toml");
    insta::assert_snapshot!(lint(&rules).format_report(Severity::Info), @r###"
    === ruleswitch: 1 issue(s) ===

    RS001 duplicate at rule #1
      warning: rule #1 `ts again` duplicates rule #0 `ts`
      = related: #0
      = help: delete rule(s) #1

    Total: 0 error(s), 1 warning(s), 0 info(s) in 2 rule(s)
    "###);
}

// ── Scenario E: a context predicate keeps the later rule reachable ──

#[test]
fn extra_context_predicate_is_not_unreachable() {
    let rules = fixture("scenario_e.toml");
    let report = lint(&rules);
    assert!(report.by_kind(IssueKind::Unreachable).is_empty());

    let debugging = ContextSnapshot::new()
        .with_language("typescript")
        .with_debug(ruleswitch_core::DebugSessionState::Active, None);
    assert_eq!(evaluate(&rules, &debugging).rule_index, Some(0));
}

// ── Directories outside the sample corpus ──

#[test]
fn language_narrowing_of_same_directory_is_unreachable() {
    let rules = fixture("app_directory.toml");
    assert!(can_both_match(rules[0].predicate(), rules[1].predicate()));
    assert!(can_both_match(rules[2].predicate(), rules[3].predicate()));

    let report = lint(&rules);
    let unreachable = report.by_kind(IssueKind::Unreachable);
    assert_eq!(unreachable.len(), 1, "{:#?}", report.issues);
    assert_eq!(unreachable[0].subject_index, 1);
    assert_eq!(unreachable[0].related_indices, vec![0]);
    assert_eq!(unreachable[0].confidence, Confidence::Heuristic);
    assert_eq!(
        unreachable[0].suggested_fix,
        Some(SuggestedFix::ReorderBefore { from: 1, to: 0 })
    );

    let ctx = ContextSnapshot::new()
        .with_language("typescript")
        .with_file_path("app/x.ts");
    assert_eq!(evaluate(&rules, &ctx).rule_index, Some(0));

    let dockerfile = ContextSnapshot::new()
        .with_language("dockerfile")
        .with_file_path("deploy/api/Dockerfile");
    assert_eq!(evaluate(&rules, &dockerfile).rule_index, Some(2));
}

// ── Mixed list ──

#[test]
fn mixed_list_reports_each_defect() {
    let rules = fixture("mixed.toml");
    let report = lint(&rules);

    let subjects = |kind| {
        report
            .by_kind(kind)
            .iter()
            .map(|i| i.subject_index)
            .collect::<Vec<_>>()
    };
    assert_eq!(subjects(IssueKind::Duplicate), vec![2]);
    assert_eq!(subjects(IssueKind::Unreachable), vec![1, 4, 11]);
    assert_eq!(subjects(IssueKind::InvalidPattern), vec![8]);
    assert_eq!(subjects(IssueKind::InvalidLanguage), vec![9]);
    assert!(subjects(IssueKind::AlwaysMatches).is_empty());

    let guide = report
        .by_kind(IssueKind::Unreachable)
        .into_iter()
        .find(|i| i.subject_index == 4)
        .expect("guide rule should be unreachable");
    assert_eq!(guide.confidence, Confidence::Heuristic);
    assert!(guide.message.contains("(heuristic: based on sampled paths)"));

    assert!(report.by_kind(IssueKind::ReorderSuggestion).iter().any(|i| {
        i.suggested_fix == Some(SuggestedFix::ReorderBefore { from: 6, to: 5 })
    }));
    assert!(report.has_errors());
}

#[test]
fn mixed_list_evaluates_first_match() {
    let rules = fixture("mixed.toml");

    let guide = ContextSnapshot::new()
        .with_language("markdown")
        .with_file_path("docs/guide/setup.md");
    assert_eq!(evaluate(&rules, &guide).target.as_deref(), Some("Paper"));

    let debugging = ContextSnapshot::new()
        .with_debug(ruleswitch_core::DebugSessionState::Active, Some("node".into()));
    assert_eq!(evaluate(&rules, &debugging).target.as_deref(), Some("Red"));

    let hourly = ContextSnapshot::new().with_language("python").timer_pass([10, 11]);
    assert_eq!(evaluate(&rules, &hourly).rule_index, Some(10));

    let only_python_timer = ContextSnapshot::new().with_language("python").timer_pass([11]);
    assert_eq!(evaluate(&rules, &only_python_timer).rule_index, Some(11));
}
