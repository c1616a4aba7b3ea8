//! Rule lists as data: TOML and JSON in, TOML and JSON out.
//!
//! ```text
//! TOML / JSON text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! Vec<Rule> (pure domain model)
//! ```
//!
//! Loading fails only for structural problems. A malformed glob is kept as
//! written and reported by lint instead.

pub mod config_dto;
pub mod loader;

use crate::model::Rule;
use config_dto::{JsonRulesDto, RuleDto, RuleSetDto};

pub use loader::LoadError;

/// Errors from parsing rule-list text.
#[derive(Debug, thiserror::Error)]
pub enum LoadRulesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain model validation failed.
    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Parses the `[[rules]]` array of a TOML document.
///
/// Other top-level tables are ignored; a document without rules yields an
/// empty list.
///
/// # Errors
///
/// Returns an error if TOML parsing or rule validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<Vec<Rule>, LoadRulesError> {
    let dto: RuleSetDto = toml::from_str(content)?;
    Ok(loader::load(dto.rules)?)
}

/// Parses a JSON rule list, either a bare array or `{"rules": [...]}`.
///
/// # Errors
///
/// Returns an error if JSON parsing or rule validation fails.
pub fn load_rules_from_json(content: &str) -> Result<Vec<Rule>, LoadRulesError> {
    let dto: JsonRulesDto = serde_json::from_str(content)?;
    Ok(loader::load(dto.into_rules())?)
}

/// Converts rules back into their DTO form.
#[must_use]
pub fn rules_to_dto(rules: &[Rule]) -> Vec<RuleDto> {
    rules.iter().map(RuleDto::from).collect()
}

/// Renders rules as a TOML `[[rules]]` document.
///
/// # Errors
///
/// Returns an error if TOML serialization fails.
pub fn rules_to_toml(rules: &[Rule]) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&RuleSetDto {
        rules: rules_to_dto(rules),
    })
}

/// Renders rules as a TOML array value, for splicing into an existing table.
///
/// # Errors
///
/// Returns an error if TOML serialization fails.
pub fn rules_to_toml_value(rules: &[Rule]) -> Result<toml::Value, toml::ser::Error> {
    toml::Value::try_from(rules_to_dto(rules))
}

/// Renders rules as a pretty JSON `{"rules": [...]}` document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn rules_to_json(rules: &[Rule]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RuleSetDto {
        rules: rules_to_dto(rules),
    })
}
