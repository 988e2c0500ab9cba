//! Options controlling one resolution session.

use serde::{Deserialize, Serialize};

/// Whether omissions and ignored overrides are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiagnosticMode {
    /// Leave unmapped properties out without comment.
    #[default]
    Silent,
    /// Record a diagnostic for every omission and every ignored override.
    Collect,
}

/// How destination property names are matched against source names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NameMatching {
    /// Identical names only.
    #[default]
    Exact,
    /// ASCII case-insensitive, preferring an exact match.
    IgnoreCase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub diagnostics: DiagnosticMode,
    pub name_matching: NameMatching,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact name matching with every omission reported.
    pub fn strict() -> Self {
        Self {
            diagnostics: DiagnosticMode::Collect,
            name_matching: NameMatching::Exact,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, mode: DiagnosticMode) -> Self {
        self.diagnostics = mode;
        self
    }

    #[must_use]
    pub fn with_name_matching(mut self, matching: NameMatching) -> Self {
        self.name_matching = matching;
        self
    }

    pub fn collects_diagnostics(&self) -> bool {
        self.diagnostics == DiagnosticMode::Collect
    }
}
