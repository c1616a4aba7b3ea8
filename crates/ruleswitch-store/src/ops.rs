//! Index-based list mutations.
//!
//! Every operation validates all of its indices before touching the list,
//! so a failed call leaves the list unchanged.

use ruleswitch_core::{Rule, SuggestedFix};

use crate::StoreError;

fn check_index(index: usize, len: usize) -> Result<(), StoreError> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::InvalidIndex { index, len })
    }
}

/// Removes the rules at `indices`. Repeated indices are removed once.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIndex`] if any index is out of range.
pub fn delete_many(rules: &mut Vec<Rule>, indices: &[usize]) -> Result<(), StoreError> {
    for &index in indices {
        check_index(index, rules.len())?;
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    for index in sorted.into_iter().rev() {
        rules.remove(index);
    }
    Ok(())
}

/// Moves rule `from` so it sits immediately before the rule currently at
/// `to`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIndex`] if either index is out of range.
pub fn move_before(rules: &mut Vec<Rule>, from: usize, to: usize) -> Result<(), StoreError> {
    check_index(from, rules.len())?;
    check_index(to, rules.len())?;
    if from == to || from + 1 == to {
        return Ok(());
    }
    let rule = rules.remove(from);
    let dest = if from < to { to - 1 } else { to };
    rules.insert(dest, rule);
    Ok(())
}

/// Applies a lint fix.
///
/// A merge keeps the first listed rule and deletes the rest.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIndex`] for out-of-range indices and
/// [`StoreError::InvalidFix`] for a merge of fewer than two rules.
pub fn apply_fix(rules: &mut Vec<Rule>, fix: &SuggestedFix) -> Result<(), StoreError> {
    match fix {
        SuggestedFix::Delete { indices } => delete_many(rules, indices),
        SuggestedFix::ReorderBefore { from, to } => move_before(rules, *from, *to),
        SuggestedFix::Merge { indices } => {
            let mut sorted = indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            let [_keep, rest @ ..] = sorted.as_slice() else {
                return Err(StoreError::InvalidFix {
                    reason: "merge needs at least two rules".into(),
                });
            };
            if rest.is_empty() {
                return Err(StoreError::InvalidFix {
                    reason: "merge needs at least two rules".into(),
                });
            }
            for &index in &sorted {
                check_index(index, rules.len())?;
            }
            delete_many(rules, rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleswitch_core::Predicate;

    fn named(names: &[&str]) -> Vec<Rule> {
        names
            .iter()
            .map(|n| Rule::new(*n, Predicate::new().language("rust"), "T").unwrap())
            .collect()
    }

    fn names(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(Rule::name).collect()
    }

    #[test]
    fn delete_many_removes_each_once() {
        let mut rules = named(&["a", "b", "c", "d"]);
        delete_many(&mut rules, &[3, 1, 1]).unwrap();
        assert_eq!(names(&rules), vec!["a", "c"]);
    }

    #[test]
    fn delete_many_is_all_or_nothing() {
        let mut rules = named(&["a", "b"]);
        let err = delete_many(&mut rules, &[0, 5]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidIndex { index: 5, len: 2 }));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn move_before_in_both_directions() {
        let mut rules = named(&["a", "b", "c", "d"]);
        move_before(&mut rules, 3, 1).unwrap();
        assert_eq!(names(&rules), vec!["a", "d", "b", "c"]);
        move_before(&mut rules, 0, 3).unwrap();
        assert_eq!(names(&rules), vec!["d", "b", "a", "c"]);
        move_before(&mut rules, 1, 2).unwrap();
        assert_eq!(names(&rules), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn merge_keeps_first() {
        let mut rules = named(&["a", "b", "c"]);
        apply_fix(&mut rules, &SuggestedFix::Merge { indices: vec![2, 0] }).unwrap();
        assert_eq!(names(&rules), vec!["a", "b"]);
    }

    #[test]
    fn merge_of_one_rule_is_rejected() {
        let mut rules = named(&["a", "b"]);
        for indices in [vec![], vec![1], vec![1, 1]] {
            let err = apply_fix(&mut rules, &SuggestedFix::Merge { indices }).unwrap_err();
            assert!(matches!(err, StoreError::InvalidFix { .. }));
        }
        assert_eq!(rules.len(), 2);
    }
}
