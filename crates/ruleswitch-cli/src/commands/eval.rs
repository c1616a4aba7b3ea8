//! Eval command implementation.

use anyhow::Result;
use ruleswitch_core::{
    evaluate, languages, ContextSnapshot, DebugSessionState, Evaluation, Rule, TestState, ViewMode,
};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Context flags for `ruleswitch eval`.
#[derive(Debug, Default)]
pub struct ContextArgs {
    pub language: Option<String>,
    pub path: Option<String>,
    pub workspace: Option<String>,
    pub debug: Option<DebugSessionState>,
    pub debug_type: Option<String>,
    pub test: Option<TestState>,
    pub view: Option<ViewMode>,
    pub timer_fired: Vec<usize>,
}

impl ContextArgs {
    /// Builds the snapshot, inferring the language from the path when absent.
    pub fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new();
        let language = self.language.clone().or_else(|| {
            self.path
                .as_deref()
                .and_then(languages::language_for_path)
                .map(str::to_string)
        });
        if let Some(language) = language {
            ctx = ctx.with_language(language);
        }
        if let Some(path) = &self.path {
            ctx = ctx.with_file_path(path);
        }
        if let Some(workspace) = &self.workspace {
            ctx = ctx.with_workspace(workspace.clone());
        }
        let debug = self.debug.unwrap_or(if self.debug_type.is_some() {
            DebugSessionState::Active
        } else {
            DebugSessionState::Inactive
        });
        ctx = ctx
            .with_debug(debug, self.debug_type.clone())
            .with_test_state(self.test.unwrap_or_default())
            .with_view_mode(self.view.unwrap_or_default());
        if !self.timer_fired.is_empty() {
            ctx = ctx.timer_pass(self.timer_fired.iter().copied());
        }
        ctx
    }
}

/// Runs the eval command.
pub fn run(
    file: Option<&Path>,
    source: &ConfigSource,
    args: &ContextArgs,
    format: OutputFormat,
) -> Result<()> {
    let (_, path, rules) = super::load_inputs(file, source)?;
    let ctx = args.snapshot();
    tracing::debug!(?ctx, "Evaluating {} rule(s) from {}", rules.len(), path.display());

    let outcome = evaluate(&rules, &ctx);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text | OutputFormat::Compact | OutputFormat::Pretty => {
            println!("{}", describe(&rules, &outcome));
        }
    }
    Ok(())
}

fn describe(rules: &[Rule], outcome: &Evaluation) -> String {
    match (outcome.rule_index, outcome.target.as_deref()) {
        (Some(index), Some(target)) => {
            let name = rules.get(index).map_or("?", Rule::name);
            format!("rule #{index} `{name}` → {target}")
        }
        _ => "no rule matched".to_string(),
    }
}
