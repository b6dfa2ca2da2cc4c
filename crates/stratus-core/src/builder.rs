//! Declarative construction of a [`Diagram`].
//!
//! Clusters are scopes: every node declared inside a [`Scope::cluster`]
//! closure lands in that cluster, and whatever the closure returns is handed
//! back to the caller so node handles can escape the block.
//!
//! ```
//! use stratus_core::{
//!     builder::{DiagramBuilder, EdgeSpec},
//!     kind::aws,
//!     style::EdgeStyle,
//! };
//!
//! let diagram = DiagramBuilder::new("Queue Worker").build(|d| {
//!     let queue = d.node("queue", aws::SQS, "Jobs");
//!     let (a, b) = d.cluster("Workers", |c| {
//!         (
//!             c.node("worker_a", aws::LAMBDA, "Worker A"),
//!             c.node("worker_b", aws::LAMBDA, "Worker B"),
//!         )
//!     });
//!     d.fan_out(queue, &[a, b], &EdgeSpec::new().label("poll").style(EdgeStyle::Dashed));
//! });
//!
//! assert_eq!(diagram.summary().nodes, 3);
//! assert_eq!(diagram.edges().len(), 2);
//! ```

use log::trace;

use crate::{
    color::Color,
    identifier::Id,
    kind::NodeKind,
    semantic::{Cluster, ClusterMember, Diagram, Direction, Edge, Node, OutputFormat, snake_case},
    style::{EdgeDirection, EdgeStyle},
};

/// Handle to a declared node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(Id);

impl NodeRef {
    pub fn id(&self) -> Id {
        self.0
    }
}

/// Label and styling shared by one or more edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSpec {
    label: Option<String>,
    style: EdgeStyle,
    color: Option<Color>,
    direction: EdgeDirection,
}

impl EdgeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn direction(mut self, direction: EdgeDirection) -> Self {
        self.direction = direction;
        self
    }

    fn to_edge(&self, source: Id, target: Id) -> Edge {
        let mut edge = Edge::new(source, target)
            .with_style(self.style)
            .with_direction(self.direction);
        if let Some(label) = &self.label {
            edge = edge.with_label(label.clone());
        }
        if let Some(color) = self.color {
            edge = edge.with_color(color);
        }
        edge
    }
}

/// Builder for a [`Diagram`]: diagram-level settings first, then the content
/// inside [`DiagramBuilder::build`].
#[derive(Debug)]
pub struct DiagramBuilder {
    diagram: Diagram,
}

impl DiagramBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            diagram: Diagram::new(name),
        }
    }

    /// Output file stem; defaults to the diagram name in snake case.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.diagram.set_filename(filename);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.diagram.set_direction(direction);
        self
    }

    pub fn format(self, format: OutputFormat) -> Self {
        self.formats(vec![format])
    }

    pub fn formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.diagram.set_formats(formats);
        self
    }

    /// Raw Graphviz graph attribute such as `dpi` or `size`.
    pub fn graph_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.diagram.set_graph_attr(key, value);
        self
    }

    /// Runs `declare` against the root scope and returns the finished diagram.
    pub fn build(self, declare: impl FnOnce(&mut Scope<'_>)) -> Diagram {
        let mut diagram = self.diagram;
        let mut edges = Vec::new();

        let mut root = Scope::new(None, &mut edges);
        declare(&mut root);
        let members = root.members;

        for member in members {
            match member {
                ClusterMember::Node(node) => diagram.push_node(node),
                ClusterMember::Cluster(cluster) => diagram.push_cluster(cluster),
            }
        }
        edges.into_iter().for_each(|edge| diagram.push_edge(edge));

        diagram
    }
}

/// The diagram root or one cluster, while it is being declared.
#[derive(Debug)]
pub struct Scope<'a> {
    /// Path of the enclosing cluster; `None` at the diagram root.
    path: Option<Id>,
    members: Vec<ClusterMember>,
    edges: &'a mut Vec<Edge>,
}

impl<'a> Scope<'a> {
    fn new(path: Option<Id>, edges: &'a mut Vec<Edge>) -> Self {
        Self {
            path,
            members: Vec::new(),
            edges,
        }
    }

    /// Declares a node in this scope. `key` is the node's identity; it must be
    /// unique across the diagram.
    pub fn node(&mut self, key: &str, kind: NodeKind, label: impl Into<String>) -> NodeRef {
        let id = Id::new(key);
        self.members.push(ClusterMember::Node(Node::new(id, kind, label)));
        NodeRef(id)
    }

    /// Declares a nested cluster and returns what `declare` returns.
    ///
    /// The cluster's id is its path: the enclosing cluster's id joined with
    /// this label in snake case, e.g. `storage::s3_buckets`.
    pub fn cluster<R>(&mut self, label: &str, declare: impl FnOnce(&mut Scope<'_>) -> R) -> R {
        let segment = Id::new(&snake_case(label));
        let id = match self.path {
            Some(parent) => parent.create_nested(segment),
            None => segment,
        };
        trace!(cluster = label, id:% = id; "Declaring cluster");

        let mut child = Scope::new(Some(id), &mut *self.edges);
        let result = declare(&mut child);
        let members = child.members;

        let mut cluster = Cluster::new(id, label);
        for member in members {
            match member {
                ClusterMember::Node(node) => cluster.push_node(node),
                ClusterMember::Cluster(nested) => cluster.push_cluster(nested),
            }
        }
        self.members.push(ClusterMember::Cluster(cluster));

        result
    }

    /// Plain forward edge (`source >> target`).
    pub fn connect(&mut self, source: NodeRef, target: NodeRef) {
        self.edges.push(Edge::new(source.id(), target.id()));
    }

    /// Edge carrying the label and styling of `spec`.
    pub fn connect_with(&mut self, source: NodeRef, target: NodeRef, spec: &EdgeSpec) {
        self.edges.push(spec.to_edge(source.id(), target.id()));
    }

    /// One edge from `source` to each of `targets` (`source >> [a, b]`).
    pub fn fan_out(&mut self, source: NodeRef, targets: &[NodeRef], spec: &EdgeSpec) {
        for target in targets {
            self.connect_with(source, *target, spec);
        }
    }

    /// One edge from each of `sources` to `target` (`[a, b] >> target`).
    pub fn fan_in(&mut self, sources: &[NodeRef], target: NodeRef, spec: &EdgeSpec) {
        for source in sources {
            self.connect_with(*source, target, spec);
        }
    }

    /// Adds a prebuilt edge. Its endpoints are not checked here.
    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{aws, generic};

    #[test]
    fn test_settings_are_applied() {
        let diagram = DiagramBuilder::new("Settings Check")
            .filename("custom_name")
            .direction(Direction::LeftRight)
            .format(OutputFormat::Svg)
            .graph_attr("dpi", "300")
            .build(|_| {});

        assert_eq!(diagram.filename(), "custom_name");
        assert_eq!(diagram.direction(), Direction::LeftRight);
        assert_eq!(diagram.formats(), &[OutputFormat::Svg]);
        assert_eq!(diagram.graph_attrs().get("dpi").map(String::as_str), Some("300"));
    }

    #[test]
    fn test_nested_clusters_keep_their_nodes() {
        let diagram = DiagramBuilder::new("Nesting").build(|d| {
            d.node("nest_phone", generic::MOBILE, "Phone");
            d.cluster("Storage", |storage| {
                storage.cluster("Buckets", |buckets| {
                    buckets.node("nest_bucket", aws::S3, "Bucket");
                });
                storage.node("nest_table", aws::DYNAMODB, "Table");
            });
        });

        assert_eq!(diagram.top_level_nodes().count(), 1);
        let storage = diagram.clusters().next().unwrap();
        assert_eq!(storage.label(), "Storage");
        assert_eq!(storage.nodes().next().unwrap().label(), "Table");

        let buckets = storage.clusters().next().unwrap();
        assert_eq!(buckets.label(), "Buckets");
        assert_eq!(buckets.nodes().next().unwrap().id(), "nest_bucket");

        // Buckets was declared before Table
        assert!(matches!(storage.members()[0], ClusterMember::Cluster(_)));
        assert!(matches!(storage.members()[1], ClusterMember::Node(_)));
    }

    #[test]
    fn test_cluster_ids_are_label_paths() {
        let diagram = DiagramBuilder::new("Paths").build(|d| {
            d.cluster("Serverless Compute", |c| {
                c.cluster("Core Functions", |c| {
                    c.node("path_fn", aws::LAMBDA, "Fn");
                });
            });
            d.cluster("S3  Buckets", |c| {
                c.node("path_bucket", aws::S3, "Bucket");
            });
        });

        let mut clusters = diagram.clusters();
        let compute = clusters.next().unwrap();
        assert_eq!(compute.id(), "serverless_compute");
        assert_eq!(
            compute.clusters().next().unwrap().id(),
            "serverless_compute::core_functions"
        );
        assert_eq!(clusters.next().unwrap().id(), "s3_buckets");
    }

    #[test]
    fn test_root_keeps_declaration_order() {
        let diagram = DiagramBuilder::new("Root Order").build(|d| {
            d.cluster("Edge", |c| {
                c.node("root_cdn", aws::CLOUDFRONT, "CDN");
            });
            d.node("root_users", generic::MOBILE, "Users");
        });

        assert!(matches!(diagram.members()[0], ClusterMember::Cluster(_)));
        assert!(matches!(diagram.members()[1], ClusterMember::Node(_)));
    }

    #[test]
    fn test_cluster_returns_handles() {
        let diagram = DiagramBuilder::new("Handles").build(|d| {
            let api = d.node("handle_api", aws::API_GATEWAY, "API");
            let worker = d.cluster("Compute", |c| c.node("handle_fn", aws::LAMBDA, "Fn"));
            d.connect(api, worker);
        });

        let edge = &diagram.edges()[0];
        assert_eq!(edge.source(), "handle_api");
        assert_eq!(edge.target(), "handle_fn");
        assert_eq!(edge.label(), None);
        assert_eq!(edge.style(), EdgeStyle::Solid);
    }

    #[test]
    fn test_fan_in_and_out_share_spec() {
        let spec = EdgeSpec::new().label("Cache").style(EdgeStyle::Dashed);
        let diagram = DiagramBuilder::new("Fans").build(|d| {
            let a = d.node("fan_a", aws::LAMBDA, "A");
            let b = d.node("fan_b", aws::LAMBDA, "B");
            let cache = d.node("fan_cache", aws::ELASTICACHE, "Cache");
            let queue = d.node("fan_queue", aws::SQS, "Queue");
            d.fan_in(&[a, b], cache, &spec);
            d.fan_out(queue, &[a, b], &EdgeSpec::new().direction(EdgeDirection::Both));
        });

        let edges = diagram.edges();
        assert_eq!(edges.len(), 4);
        assert!(edges[..2].iter().all(|e| e.target() == "fan_cache"));
        assert!(edges[..2].iter().all(|e| e.label() == Some("Cache")));
        assert!(edges[..2].iter().all(|e| e.style() == EdgeStyle::Dashed));
        assert!(edges[2..].iter().all(|e| e.source() == "fan_queue"));
        assert!(edges[2..].iter().all(|e| e.direction() == EdgeDirection::Both));
    }
}
