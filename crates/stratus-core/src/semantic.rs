//! Diagram model: nodes, clusters, edges and the diagram that owns them.
//!
//! The model is plain data. Nothing here checks that an edge points at a
//! declared node or that node keys are unique; a diagram is authored, so the
//! lint in the `stratus` crate reports such mistakes before rendering.
//!
//! ```text
//! Diagram
//! ├── members     (top-level nodes and clusters, in declaration order;
//! │                clusters nest to any depth the same way)
//! └── edges       (diagram-wide, reference nodes by Id)
//! ```

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    color::Color,
    identifier::Id,
    kind::NodeKind,
    style::{EdgeDirection, EdgeStyle},
};

/// Error produced when an output format is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what} `{value}`, valid values: {expected}")]
pub struct ParseOptionError {
    what: &'static str,
    value: String,
    expected: &'static str,
}

/// Rank direction of the rendered graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl Direction {
    /// Graphviz `rankdir` value.
    pub fn to_dot_value(&self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }
}

/// Image format written by the renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    /// The DOT source itself; written without running Graphviz.
    Dot,
}

impl OutputFormat {
    /// File extension, which is also the Graphviz `-T` value.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(ParseOptionError {
                what: "output format",
                value: s.to_string(),
                expected: "png, jpg, svg, pdf, dot",
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A labeled icon representing one piece of infrastructure.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
}

impl Node {
    /// Creates a node.
    ///
    /// # Arguments
    ///
    /// * `id` - The node key, unique across the diagram
    /// * `kind` - Which service the node depicts
    /// * `label` - Display text, possibly spanning several lines
    pub fn new(id: Id, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
        }
    }

    /// Key that edges use to reference this node.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Service kind, which selects the shape and fill color.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display label; `\n` separates lines.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A directed, optionally labeled and styled connector between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    label: Option<String>,
    style: EdgeStyle,
    color: Option<Color>,
    direction: EdgeDirection,
}

impl Edge {
    /// Creates an unlabeled, solid, forward edge from `source` to `target`.
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            source,
            target,
            label: None,
            style: EdgeStyle::default(),
            color: None,
            direction: EdgeDirection::default(),
        }
    }

    /// Sets the text drawn along the edge.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the line pattern. See [`EdgeStyle`] for what each one conveys.
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Overrides the configured edge color for this edge only.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets which ends carry an arrowhead.
    pub fn with_direction(mut self, direction: EdgeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Key of the node the edge starts at.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Key of the node the edge points to.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Edge label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Line pattern.
    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    /// Color override, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Arrowhead placement.
    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }
}

/// One entry of a [`Cluster`], in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterMember {
    Node(Node),
    Cluster(Cluster),
}

/// A named visual grouping of nodes and nested clusters.
///
/// Members keep the order they were declared in, so a node declared after a
/// nested cluster is also emitted after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: String,
    members: Vec<ClusterMember>,
}

impl Cluster {
    /// Creates an empty cluster.
    ///
    /// # Arguments
    ///
    /// * `id` - The cluster path, such as `storage::s3_buckets`
    /// * `label` - The caption drawn on the cluster
    pub fn new(id: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            members: Vec::new(),
        }
    }

    /// Appends a node after the existing members.
    pub fn push_node(&mut self, node: Node) {
        self.members.push(ClusterMember::Node(node));
    }

    /// Appends a nested cluster after the existing members.
    pub fn push_cluster(&mut self, cluster: Cluster) {
        self.members.push(ClusterMember::Cluster(cluster));
    }

    /// Path of this cluster from the diagram root, segments joined by `::`.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Caption drawn on the cluster.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Direct members in declaration order.
    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    /// Nodes declared directly in this cluster.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Node(node) => Some(node),
            ClusterMember::Cluster(_) => None,
        })
    }

    /// Clusters nested directly in this cluster.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Cluster(cluster) => Some(cluster),
            ClusterMember::Node(_) => None,
        })
    }

    /// True when neither this cluster nor any nested cluster holds a node.
    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|member| match member {
            ClusterMember::Node(_) => false,
            ClusterMember::Cluster(cluster) => cluster.is_empty(),
        })
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a Node>) {
        for member in &self.members {
            match member {
                ClusterMember::Node(node) => out.push(node),
                ClusterMember::Cluster(cluster) => cluster.collect_nodes(out),
            }
        }
    }

    fn count_clusters(&self) -> usize {
        1 + self.clusters().map(Cluster::count_clusters).sum::<usize>()
    }
}

/// Structural fingerprint of a diagram: counts and labels in declaration order.
///
/// Two renders of the same diagram produce equal summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSummary {
    pub nodes: usize,
    pub edges: usize,
    pub clusters: usize,
    pub node_labels: Vec<String>,
    pub edge_labels: Vec<String>,
}

/// A complete architecture diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    name: String,
    filename: String,
    direction: Direction,
    formats: Vec<OutputFormat>,
    graph_attrs: IndexMap<String, String>,
    members: Vec<ClusterMember>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Creates an empty diagram rendered as PNG, top to bottom, into a file
    /// named after the diagram (see [`default_filename`]).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let filename = default_filename(&name);
        Self {
            name,
            filename,
            direction: Direction::default(),
            formats: vec![OutputFormat::default()],
            graph_attrs: IndexMap::new(),
            members: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Sets the output file stem, without extension.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Sets the rank direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Replaces the output formats. An empty list keeps the current formats.
    pub fn set_formats(&mut self, formats: Vec<OutputFormat>) {
        if !formats.is_empty() {
            self.formats = formats;
        }
    }

    /// Sets a raw Graphviz graph attribute, overriding the renderer defaults.
    pub fn set_graph_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.graph_attrs.insert(key.into(), value.into());
    }

    /// Adds a node outside any cluster.
    pub fn push_node(&mut self, node: Node) {
        self.members.push(ClusterMember::Node(node));
    }

    /// Adds a top-level cluster.
    pub fn push_cluster(&mut self, cluster: Cluster) {
        self.members.push(ClusterMember::Cluster(cluster));
    }

    /// Adds an edge. Endpoints are not checked until the diagram is linted.
    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Diagram title, drawn at the top of the image.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output file stem, without extension.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Rank direction; top to bottom unless changed.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Formats written when the configuration does not name any.
    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    /// Raw Graphviz graph attributes, in insertion order.
    pub fn graph_attrs(&self) -> &IndexMap<String, String> {
        &self.graph_attrs
    }

    /// Top-level nodes and clusters in declaration order.
    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    /// Nodes declared outside any cluster.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Node(node) => Some(node),
            ClusterMember::Cluster(_) => None,
        })
    }

    /// Top-level clusters.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Cluster(cluster) => Some(cluster),
            ClusterMember::Node(_) => None,
        })
    }

    /// Every edge, in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every node in the diagram, depth-first in declaration order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for member in &self.members {
            match member {
                ClusterMember::Node(node) => out.push(node),
                ClusterMember::Cluster(cluster) => cluster.collect_nodes(&mut out),
            }
        }
        out
    }

    /// Looks up a node anywhere in the diagram.
    pub fn find_node(&self, id: Id) -> Option<&Node> {
        self.nodes().into_iter().find(|node| node.id() == id)
    }

    /// Counts and labels of the diagram. See [`DiagramSummary`].
    pub fn summary(&self) -> DiagramSummary {
        let nodes = self.nodes();
        DiagramSummary {
            nodes: nodes.len(),
            edges: self.edges.len(),
            clusters: self.clusters().map(Cluster::count_clusters).sum(),
            node_labels: nodes.iter().map(|node| node.label().to_string()).collect(),
            edge_labels: self
                .edges
                .iter()
                .filter_map(|edge| edge.label().map(str::to_string))
                .collect(),
        }
    }
}

/// Derives the output file stem from a diagram name: lower-cased, with runs of
/// whitespace replaced by a single `_`.
///
/// ```
/// use stratus_core::semantic::default_filename;
///
/// assert_eq!(default_filename("ilikeyacut AWS  Infrastructure"), "ilikeyacut_aws_infrastructure");
/// ```
pub fn default_filename(name: &str) -> String {
    snake_case(name)
}

/// Lower-cases `text` and joins its whitespace-separated words with `_`.
pub(crate) fn snake_case(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
