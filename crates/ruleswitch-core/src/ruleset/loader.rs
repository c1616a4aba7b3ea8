//! DTO → Domain model conversion with validation.

use std::num::NonZeroU32;

use tracing::debug;

use super::config_dto::{RuleDto, WhenDto};
use crate::model::{ModelError, Predicate, Rule};

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "rules[2].when.timerInterval").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },
}

/// Converts rule DTOs into validated rules, preserving order.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dtos: Vec<RuleDto>) -> Result<Vec<Rule>, LoadError> {
    let rules = dtos
        .into_iter()
        .enumerate()
        .map(|(i, dto)| convert_rule(dto, i))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rules = rules.len(), "rule list loaded");
    Ok(rules)
}

fn convert_rule(dto: RuleDto, index: usize) -> Result<Rule, LoadError> {
    let ctx = format!("rules[{index}]");
    let predicate = convert_when(&dto.when, &ctx)?;
    Rule::new(dto.name, predicate, dto.target).map_err(|e| LoadError::Validation {
        context: ctx,
        source: e,
    })
}

fn convert_when(when: &WhenDto, ctx: &str) -> Result<Predicate, LoadError> {
    let field = |name: &'static str| {
        let context = format!("{ctx}.when.{name}");
        move |source: ModelError| LoadError::Validation { context, source }
    };

    let mut predicate = Predicate::new();
    if let Some(language) = &when.language {
        predicate = predicate.language(language.clone());
    }
    if let Some(pattern) = &when.pattern {
        predicate = predicate.path_pattern(pattern);
    }
    if let Some(workspace) = &when.workspace {
        predicate = predicate.workspace(workspace.clone());
    }
    if let Some(state) = &when.debug_session {
        predicate = predicate.debug_session(state.parse().map_err(field("debugSession"))?);
    }
    if let Some(debug_type) = &when.debug_type {
        predicate = predicate.debug_type(debug_type.clone());
    }
    if let Some(state) = &when.test_state {
        predicate = predicate.test_state(state.parse().map_err(field("testState"))?);
    }
    if let Some(mode) = &when.view_mode {
        predicate = predicate.view_mode(mode.parse().map_err(field("viewMode"))?);
    }
    if let Some(minutes) = when.timer_interval {
        predicate = predicate.timer_interval(timer_minutes(minutes).map_err(field("timerInterval"))?);
    }
    Ok(predicate)
}

fn timer_minutes(value: i64) -> Result<NonZeroU32, ModelError> {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(ModelError::InvalidTimerInterval { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DebugSessionState, TestState, ViewMode};

    fn dto(when: WhenDto) -> RuleDto {
        RuleDto {
            name: "r".into(),
            target: "T".into(),
            when,
        }
    }

    #[test]
    fn converts_every_axis() {
        let rules = load(vec![dto(WhenDto {
            language: Some("go".into()),
            pattern: Some("cmd/**".into()),
            workspace: Some("api".into()),
            debug_session: Some("active".into()),
            debug_type: Some("dlv".into()),
            test_state: Some("none".into()),
            view_mode: Some("merge".into()),
            timer_interval: Some(15),
        })])
        .unwrap();
        let p = rules[0].predicate();
        assert_eq!(p.count(), 8);
        assert_eq!(p.context.debug_session, Some(DebugSessionState::Active));
        assert_eq!(p.context.test_state, Some(TestState::Idle));
        assert_eq!(p.context.view_mode, Some(ViewMode::Merge));
        assert_eq!(p.context.timer_interval_minutes.map(NonZeroU32::get), Some(15));
    }

    #[test]
    fn rejects_non_positive_timer() {
        for value in [0, -5] {
            let err = load(vec![dto(WhenDto {
                timer_interval: Some(value),
                ..WhenDto::default()
            })])
            .unwrap_err();
            let LoadError::Validation { context, source } = err;
            assert_eq!(context, "rules[0].when.timerInterval");
            assert_eq!(source, ModelError::InvalidTimerInterval { value });
        }
    }

    #[test]
    fn rejects_unknown_enum_value() {
        let err = load(vec![dto(WhenDto {
            view_mode: Some("split".into()),
            ..WhenDto::default()
        })])
        .unwrap_err();
        assert!(err.to_string().contains("rules[0].when.viewMode"));
    }

    #[test]
    fn rejects_empty_name() {
        let mut bad = dto(WhenDto::default());
        bad.name = "  ".into();
        let err = load(vec![dto(WhenDto::default()), bad]).unwrap_err();
        assert!(err.to_string().starts_with("rules[1]: "));
    }
}
