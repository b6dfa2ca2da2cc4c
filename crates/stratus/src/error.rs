//! Error types for Stratus operations.
//!
//! [`StratusError`] is the single error type returned by the renderer. Lint
//! failures carry every blocking issue at once so an author can fix them in
//! one pass.

use std::io;

use thiserror::Error;

use crate::{export, validate::LintIssue};

/// The main error type for Stratus operations.
#[derive(Debug, Error)]
pub enum StratusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Diagram failed validation: {}", join_issues(.0))]
    Validation(Vec<LintIssue>),

    #[error("Export error: {0}")]
    Export(export::Error),
}

impl From<export::Error> for StratusError {
    fn from(error: export::Error) -> Self {
        Self::Export(error)
    }
}

impl StratusError {
    /// True when rendering failed because the Graphviz executable could not be run.
    pub fn is_missing_graphviz(&self) -> bool {
        matches!(self, Self::Export(export::Error::GraphvizMissing))
    }
}

fn join_issues(issues: &[LintIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
