//! Serde representation of rule lists (DTO layer).
//!
//! These types exist solely for (de)serialization. They are converted to
//! domain model types via the loader.

use serde::{Deserialize, Serialize};

use crate::model::Rule;

/// A document carrying a `rules` array.
///
/// Unknown top-level keys are ignored so the rules can share a file with
/// the rest of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetDto {
    /// Rules in priority order.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// JSON input: a bare array or an object with `rules`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonRulesDto {
    /// `[ {...}, ... ]`
    List(Vec<RuleDto>),
    /// `{ "rules": [ ... ] }`
    Set(RuleSetDto),
}

impl JsonRulesDto {
    /// Unwraps either form into the rule list.
    #[must_use]
    pub fn into_rules(self) -> Vec<RuleDto> {
        match self {
            Self::List(rules) => rules,
            Self::Set(set) => set.rules,
        }
    }
}

/// One rule as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDto {
    /// Rule name.
    pub name: String,
    /// Target selected when the rule wins.
    pub target: String,
    /// Predicates; an empty table matches every ordinary pass.
    #[serde(default)]
    pub when: WhenDto,
}

/// Predicate table. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WhenDto {
    /// Language identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Path glob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Workspace folder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// `active` or `inactive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_session: Option<String>,
    /// Debug adapter type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_type: Option<String>,
    /// `running`, `failed`, `passed` or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_state: Option<String>,
    /// `diff`, `merge` or `normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<String>,
    /// Minutes between timer passes; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_interval: Option<i64>,
}

impl From<&Rule> for RuleDto {
    fn from(rule: &Rule) -> Self {
        let file = &rule.predicate().file;
        let context = &rule.predicate().context;
        Self {
            name: rule.name().to_string(),
            target: rule.target().to_string(),
            when: WhenDto {
                language: file.language.clone(),
                pattern: file.path_pattern.as_ref().map(|p| p.as_str().to_string()),
                workspace: file.workspace_name.clone(),
                debug_session: context.debug_session.map(|s| s.as_str().to_string()),
                debug_type: context.debug_type.clone(),
                test_state: context.test_state.map(|s| s.as_str().to_string()),
                view_mode: context.view_mode.map(|m| m.as_str().to_string()),
                timer_interval: context.timer_interval_minutes.map(|m| i64::from(m.get())),
            },
        }
    }
}
