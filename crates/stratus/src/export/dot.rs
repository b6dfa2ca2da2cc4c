//! Translation of a [`Diagram`] into a Graphviz DOT graph.
//!
//! The output is fully determined by the diagram and the style configuration:
//! statements follow declaration order and attribute maps keep insertion
//! order, so rendering the same diagram twice yields identical text.
//!
//! Attribute precedence for the graph itself, later entries winning:
//! renderer defaults, then style configuration, then the diagram's own
//! `graph_attrs`.

use std::{fs, path::Path};

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use indexmap::IndexMap;
use log::{debug, trace};

use stratus_core::{
    identifier::Id,
    semantic::{Cluster, ClusterMember, Diagram, Edge, Node, OutputFormat},
    style::{EdgeDirection, EdgeStyle},
};

use super::{Error, Exporter, write_atomically};
use crate::{config::StyleConfig, error::StratusError};

/// Cluster background colors, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];
const CLUSTER_BORDER: &str = "#AEB6BE";
const NODE_FONT_COLOR: &str = "#FFFFFF";
const NODE_BORDER: &str = "#232F3E";

/// Escapes `value` for use inside a double-quoted DOT string.
///
/// Line breaks become the DOT `\n` escape, which centers each line.
///
/// ```
/// use stratus::export::dot::escape;
///
/// assert_eq!(escape("Redis Cache\nSession Store"), r"Redis Cache\nSession Store");
/// assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
/// ```
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

fn quoted(value: &str) -> DotId {
    DotId::Escaped(format!("\"{}\"", escape(value)))
}

fn attr(key: &str, value: impl AsRef<str>) -> Attribute {
    Attribute(DotId::Plain(key.to_string()), quoted(value.as_ref()))
}

fn node_id(id: Id) -> NodeId {
    NodeId(quoted(&id.to_string()), None)
}

fn font_size(size: f32) -> String {
    format!("{}", size.max(1.0))
}

/// Fonts and colors resolved once per render.
struct Theme {
    font_name: String,
    font_size: f32,
    font_color: String,
    edge_color: String,
    background: Option<String>,
}

impl Theme {
    fn from_style(style: &StyleConfig) -> Result<Self, StratusError> {
        Ok(Self {
            font_name: style.font_name().to_string(),
            font_size: style.font_size(),
            font_color: style.font_color()?.to_hex(),
            edge_color: style.edge_color()?.to_hex(),
            background: style.background_color()?.map(|color| color.to_hex()),
        })
    }
}

/// Builds the DOT graph for `diagram`.
///
/// # Errors
///
/// Returns [`StratusError::Config`] if a configured color cannot be parsed.
pub fn to_dot_graph(diagram: &Diagram, style: &StyleConfig) -> Result<Graph, StratusError> {
    let theme = Theme::from_style(style)?;
    let mut stmts = Vec::new();

    for (key, value) in graph_attributes(diagram, &theme) {
        stmts.push(Stmt::Attribute(attr(&key, value)));
    }
    stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![
        attr("shape", "box"),
        attr("style", "rounded,filled"),
        attr("color", NODE_BORDER),
        attr("fontname", &theme.font_name),
        attr("fontsize", font_size(theme.font_size - 2.0)),
        attr("fontcolor", NODE_FONT_COLOR),
        attr("margin", "0.25,0.12"),
    ])));
    stmts.push(Stmt::GAttribute(GraphAttributes::Edge(vec![
        attr("color", &theme.edge_color),
        attr("fontname", &theme.font_name),
        attr("fontsize", font_size(theme.font_size - 2.0)),
        attr("fontcolor", &theme.font_color),
    ])));

    let mut cluster_index = 0;
    push_members(&mut stmts, diagram.members(), 0, &mut cluster_index, &theme);

    stmts.extend(diagram.edges().iter().map(edge_stmt));

    debug!(
        diagram = diagram.name(),
        statements = stmts.len(),
        clusters = cluster_index;
        "DOT graph built"
    );

    Ok(Graph::DiGraph {
        id: quoted(diagram.name()),
        strict: false,
        stmts,
    })
}

/// Renders `diagram` as DOT text.
///
/// # Errors
///
/// Returns [`StratusError::Config`] if a configured color cannot be parsed.
pub fn render_dot(diagram: &Diagram, style: &StyleConfig) -> Result<String, StratusError> {
    let graph = to_dot_graph(diagram, style)?;
    let text = graph.print(&mut PrinterContext::default());
    trace!(dot = text.as_str(); "DOT source");
    Ok(text)
}

fn graph_attributes(diagram: &Diagram, theme: &Theme) -> IndexMap<String, String> {
    let mut attrs: IndexMap<String, String> = [
        ("pad", "2.0"),
        ("splines", "ortho"),
        ("nodesep", "0.60"),
        ("ranksep", "0.75"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();

    attrs.insert("fontname".into(), theme.font_name.clone());
    attrs.insert("fontsize".into(), font_size(theme.font_size));
    attrs.insert("fontcolor".into(), theme.font_color.clone());
    if let Some(background) = &theme.background {
        attrs.insert("bgcolor".into(), background.clone());
    }
    attrs.insert("label".into(), diagram.name().to_string());
    attrs.insert("labelloc".into(), "t".into());
    attrs.insert("rankdir".into(), diagram.direction().to_dot_value().into());

    for (key, value) in diagram.graph_attrs() {
        attrs.insert(key.clone(), value.clone());
    }

    attrs
}

fn node_stmt(node: &Node) -> Stmt {
    let kind = node.kind();
    let category = kind.category();

    Stmt::Node(DotNode {
        id: node_id(node.id()),
        attributes: vec![
            attr("label", node.label()),
            attr("shape", category.shape()),
            attr("fillcolor", category.fill_color()),
            attr("tooltip", kind.to_string()),
        ],
    })
}

fn cluster_stmt(cluster: &Cluster, depth: usize, index: &mut usize, theme: &Theme) -> Stmt {
    let id = DotId::Plain(format!("cluster_{index}"));
    *index += 1;

    let mut stmts = vec![
        Stmt::Attribute(attr("label", cluster.label())),
        Stmt::Attribute(attr("style", "rounded")),
        Stmt::Attribute(attr("labeljust", "l")),
        Stmt::Attribute(attr("pencolor", CLUSTER_BORDER)),
        Stmt::Attribute(attr(
            "bgcolor",
            CLUSTER_BACKGROUNDS[depth % CLUSTER_BACKGROUNDS.len()],
        )),
        Stmt::Attribute(attr("fontname", &theme.font_name)),
        Stmt::Attribute(attr("fontsize", font_size(theme.font_size - 3.0))),
    ];

    push_members(&mut stmts, cluster.members(), depth + 1, index, theme);

    Stmt::Subgraph(Subgraph { id, stmts })
}

/// Nodes and clusters in declaration order; nested clusters sit at `depth`.
fn push_members(
    stmts: &mut Vec<Stmt>,
    members: &[ClusterMember],
    depth: usize,
    index: &mut usize,
    theme: &Theme,
) {
    for member in members {
        match member {
            ClusterMember::Node(node) => stmts.push(node_stmt(node)),
            ClusterMember::Cluster(cluster) => {
                stmts.push(cluster_stmt(cluster, depth, index, theme));
            }
        }
    }
}

fn edge_stmt(edge: &Edge) -> Stmt {
    let mut attributes = Vec::new();
    if let Some(label) = edge.label() {
        attributes.push(attr("label", label));
    }
    if edge.style() != EdgeStyle::Solid {
        attributes.push(attr("style", edge.style().to_dot_value()));
    }
    if let Some(color) = edge.color() {
        attributes.push(attr("color", color.to_hex()));
    }
    if edge.direction() != EdgeDirection::Forward {
        attributes.push(attr("dir", edge.direction().to_dot_value()));
    }

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes,
    })
}

/// Writes the DOT text itself; no external tool involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotSourceExporter;

impl Exporter for DotSourceExporter {
    fn supports(&self, format: OutputFormat) -> bool {
        format == OutputFormat::Dot
    }

    fn export(&self, dot_source: &str, format: OutputFormat, path: &Path) -> Result<(), Error> {
        if !self.supports(format) {
            return Err(Error::Unsupported(format));
        }
        write_atomically(path, |temp| Ok(fs::write(temp, dot_source)?))
    }
}
