//! Static consistency checks run before a diagram is rendered.
//!
//! Blocking issues (a dangling edge endpoint, a node key declared twice) fail
//! the render with [`StratusError::Validation`]. Everything else is a warning:
//! it is logged and the render goes ahead.
//!
//! The checks walk a [`petgraph`] graph of the declared nodes, with one graph
//! edge per diagram edge whose endpoints both resolve.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use log::{debug, warn};
use petgraph::{
    Direction as GraphDirection,
    graph::{DiGraph, NodeIndex},
};

use stratus_core::{
    identifier::Id,
    semantic::{Cluster, Diagram},
};

use crate::error::StratusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Which end of an edge a [`LintIssue::DanglingEdge`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// One finding of the lint. Edge positions are indices into `Diagram::edges`.
#[derive(Debug, Clone, PartialEq)]
pub enum LintIssue {
    DanglingEdge {
        edge: usize,
        endpoint: Endpoint,
        id: Id,
    },
    DuplicateNode {
        id: Id,
    },
    DuplicateEdge {
        edge: usize,
        first: usize,
    },
    IsolatedNode {
        id: Id,
    },
    EmptyCluster {
        id: Id,
        label: String,
    },
}

impl LintIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::DanglingEdge { .. } | Self::DuplicateNode { .. } => Severity::Error,
            Self::DuplicateEdge { .. } | Self::IsolatedNode { .. } | Self::EmptyCluster { .. } => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge { edge, endpoint, id } => write!(
                f,
                "edge #{edge} {endpoint} `{id}` is not a declared node"
            ),
            Self::DuplicateNode { id } => {
                write!(f, "node key `{id}` is declared more than once")
            }
            Self::DuplicateEdge { edge, first } => {
                write!(f, "edge #{edge} repeats edge #{first}")
            }
            Self::IsolatedNode { id } => write!(f, "node `{id}` has no edges"),
            Self::EmptyCluster { id, label } => {
                write!(f, "cluster `{label}` (`{id}`) contains no nodes")
            }
        }
    }
}

/// Every issue found in a diagram, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintReport {
    issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn issues(&self) -> &[LintIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Collects every issue in `diagram` without failing.
pub fn lint(diagram: &Diagram) -> LintReport {
    let mut issues = Vec::new();
    let mut graph: DiGraph<Id, usize> = DiGraph::new();
    let mut indices: HashMap<Id, NodeIndex> = HashMap::new();

    for node in diagram.nodes() {
        match indices.entry(node.id()) {
            Entry::Occupied(_) => issues.push(LintIssue::DuplicateNode { id: node.id() }),
            Entry::Vacant(slot) => {
                slot.insert(graph.add_node(node.id()));
            }
        }
    }

    let mut seen_edges = HashMap::new();
    for (position, edge) in diagram.edges().iter().enumerate() {
        let source = indices.get(&edge.source()).copied();
        let target = indices.get(&edge.target()).copied();

        if source.is_none() {
            issues.push(LintIssue::DanglingEdge {
                edge: position,
                endpoint: Endpoint::Source,
                id: edge.source(),
            });
        }
        if target.is_none() {
            issues.push(LintIssue::DanglingEdge {
                edge: position,
                endpoint: Endpoint::Target,
                id: edge.target(),
            });
        }
        if let (Some(source), Some(target)) = (source, target) {
            graph.add_edge(source, target, position);
        }

        let key = (
            edge.source(),
            edge.target(),
            edge.label(),
            edge.style(),
            edge.direction(),
            edge.color().map(|color| color.to_hex()),
        );
        match seen_edges.entry(key) {
            Entry::Occupied(first) => issues.push(LintIssue::DuplicateEdge {
                edge: position,
                first: *first.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }

    for index in graph.node_indices() {
        if graph.neighbors_undirected(index).next().is_none() {
            issues.push(LintIssue::IsolatedNode { id: graph[index] });
        }
    }

    collect_empty_clusters(diagram.clusters(), &mut issues);

    let entry_points = graph
        .node_indices()
        .filter(|index| {
            graph
                .neighbors_directed(*index, GraphDirection::Incoming)
                .next()
                .is_none()
        })
        .count();
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        entry_points,
        issues = issues.len();
        "Diagram linted"
    );

    LintReport { issues }
}

/// Reports the outermost empty clusters only; their nested clusters are empty too.
fn collect_empty_clusters<'a>(
    clusters: impl Iterator<Item = &'a Cluster>,
    issues: &mut Vec<LintIssue>,
) {
    for cluster in clusters {
        if cluster.is_empty() {
            issues.push(LintIssue::EmptyCluster {
                id: cluster.id(),
                label: cluster.label().to_string(),
            });
        } else {
            collect_empty_clusters(cluster.clusters(), issues);
        }
    }
}

/// Lints `diagram`, logging warnings and failing on any blocking issue.
///
/// # Errors
///
/// Returns [`StratusError::Validation`] carrying every blocking issue.
pub fn validate(diagram: &Diagram) -> Result<LintReport, StratusError> {
    let report = lint(diagram);

    for issue in report.warnings() {
        warn!(diagram = diagram.name(); "{issue}");
    }

    if report.has_errors() {
        return Err(StratusError::Validation(report.errors().cloned().collect()));
    }

    Ok(report)
}
