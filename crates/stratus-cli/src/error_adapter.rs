//! Error adapter for converting [`StratusError`] to miette diagnostics.
//!
//! A validation failure carries several lint issues; each one is rendered as
//! its own report. Every other error becomes a single report with a
//! `stratus::<kind>` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity};

use stratus::{StratusError, validate::LintIssue};

/// Adapter for a single blocking lint issue.
pub struct IssueAdapter<'a>(pub &'a LintIssue);

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            LintIssue::DanglingEdge { .. } => "stratus::lint::dangling_edge",
            LintIssue::DuplicateNode { .. } => "stratus::lint::duplicate_node",
            LintIssue::DuplicateEdge { .. } => "stratus::lint::duplicate_edge",
            LintIssue::IsolatedNode { .. } => "stratus::lint::isolated_node",
            LintIssue::EmptyCluster { .. } => "stratus::lint::empty_cluster",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            LintIssue::DanglingEdge { .. } => "declare the node before connecting it",
            LintIssue::DuplicateNode { .. } => "give each node a unique key",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Adapter for every non-validation [`StratusError`].
pub struct ErrorAdapter<'a>(pub &'a StratusError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StratusError::Io(_) => "stratus::io",
            StratusError::Config(_) => "stratus::config",
            StratusError::Validation(_) => "stratus::lint",
            StratusError::Export(_) => "stratus::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.0.is_missing_graphviz() {
            return Some(Box::new(
                "install Graphviz from https://graphviz.org/download/ or pass `--format dot`",
            ));
        }
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    Issue(IssueAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(issue) => fmt::Display::fmt(issue, f),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(issue) => issue.code(),
            Reportable::Error(err) => err.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Issue(issue) => issue.severity(),
            Reportable::Error(err) => err.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(issue) => issue.help(),
            Reportable::Error(err) => err.help(),
        }
    }
}

/// Convert a [`StratusError`] into a list of reportable errors.
///
/// [`StratusError::Validation`] yields one [`Reportable`] per lint issue;
/// every other variant yields exactly one.
pub fn to_reportables(err: &StratusError) -> Vec<Reportable<'_>> {
    match err {
        StratusError::Validation(issues) if !issues.is_empty() => issues
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
