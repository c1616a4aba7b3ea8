//! Environment snapshot supplied to the evaluator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{normalize_path, DebugSessionState, TestState, ViewMode};

/// Which kind of evaluation pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    /// Steady-state evaluation; timer rules never match.
    #[default]
    Ordinary,
    /// A timer fired; only timer rules whose index fired are eligible.
    Timer,
}

/// Snapshot of the environment for one evaluation.
///
/// Built by the host per call and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSnapshot {
    /// Language identifier of the active file.
    pub language_id: Option<String>,
    /// Workspace-relative path of the active file, forward-slash normalized.
    pub file_path: Option<String>,
    /// Name of the active workspace folder.
    pub workspace_name: Option<String>,
    /// Debug session state.
    pub debug_session: DebugSessionState,
    /// Debug adapter type of the running session.
    pub debug_type: Option<String>,
    /// Test run state.
    pub test_state: TestState,
    /// Editor view mode.
    pub view_mode: ViewMode,
    /// Pass kind.
    pub pass: PassKind,
    /// Rule indices whose timer fired for this pass.
    pub timer_fired: BTreeSet<usize>,
}

impl ContextSnapshot {
    /// Creates an ordinary-pass snapshot with no active file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the active file language.
    #[must_use]
    pub fn with_language(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = Some(language_id.into());
        self
    }

    /// Sets the active file path, normalizing separators.
    #[must_use]
    pub fn with_file_path(mut self, path: &str) -> Self {
        self.file_path = Some(normalize_path(path));
        self
    }

    /// Sets the workspace folder name.
    #[must_use]
    pub fn with_workspace(mut self, name: impl Into<String>) -> Self {
        self.workspace_name = Some(name.into());
        self
    }

    /// Sets the debug session state and adapter type.
    #[must_use]
    pub fn with_debug(mut self, state: DebugSessionState, debug_type: Option<String>) -> Self {
        self.debug_session = state;
        self.debug_type = debug_type;
        self
    }

    /// Sets the test state.
    #[must_use]
    pub fn with_test_state(mut self, state: TestState) -> Self {
        self.test_state = state;
        self
    }

    /// Sets the view mode.
    #[must_use]
    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Turns this snapshot into a timer pass for the given fired rule indices.
    #[must_use]
    pub fn timer_pass(mut self, fired: impl IntoIterator<Item = usize>) -> Self {
        self.pass = PassKind::Timer;
        self.timer_fired = fired.into_iter().collect();
        self
    }

    /// Returns true if this is a timer pass.
    #[must_use]
    pub fn is_timer_pass(&self) -> bool {
        self.pass == PassKind::Timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_an_idle_editor() {
        let ctx = ContextSnapshot::new();
        assert_eq!(ctx.debug_session, DebugSessionState::Inactive);
        assert_eq!(ctx.test_state, TestState::Idle);
        assert_eq!(ctx.view_mode, ViewMode::Normal);
        assert!(!ctx.is_timer_pass());
    }

    #[test]
    fn file_path_is_normalized() {
        let ctx = ContextSnapshot::new().with_file_path(r".\src\app.ts");
        assert_eq!(ctx.file_path.as_deref(), Some("src/app.ts"));
    }

    #[test]
    fn timer_pass_records_fired_indices() {
        let ctx = ContextSnapshot::new().timer_pass([2, 0]);
        assert!(ctx.is_timer_pass());
        assert_eq!(ctx.timer_fired.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    }
}
