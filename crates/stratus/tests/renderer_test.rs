//! Integration tests for the Renderer API.

use std::fs;

use tempfile::tempdir;

use stratus::{
    Renderer, StratusError,
    builder::{DiagramBuilder, EdgeSpec},
    config::{AppConfig, OutputConfig, StyleConfig},
    identifier::Id,
    kind::aws,
    semantic::{Diagram, Edge, OutputFormat},
    style::EdgeStyle,
};

fn static_site(with_extra_node: bool) -> Diagram {
    DiagramBuilder::new("Static Site")
        .format(OutputFormat::Png)
        .build(|d| {
            let cdn = d.node("cdn", aws::CLOUDFRONT, "CDN");
            let bucket = d.cluster("Storage", |c| c.node("bucket", aws::S3, "Assets"));
            d.connect_with(cdn, bucket, &EdgeSpec::new().label("Static").style(EdgeStyle::Dashed));
            if with_extra_node {
                d.node("logs", aws::CLOUDWATCH, "Logs");
            }
        })
}

fn edge_lines(dot: &str) -> Vec<&str> {
    dot.lines().filter(|line| line.contains("->")).collect()
}

fn dot_only_renderer(directory: &std::path::Path) -> Renderer {
    Renderer::new(AppConfig::new(
        OutputConfig::new(Some(directory.to_path_buf()), vec![OutputFormat::Dot]),
        StyleConfig::default(),
    ))
}

#[test]
fn test_render_dot_source() {
    let dot = Renderer::default()
        .render_dot(&static_site(false))
        .expect("Failed to render DOT");

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("subgraph cluster_0"));
    assert_eq!(edge_lines(&dot).len(), 1);
}

#[test]
fn test_configured_formats_override_diagram_formats() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let renderer = dot_only_renderer(temp_dir.path());
    let diagram = static_site(false);

    assert_eq!(renderer.formats_for(&diagram), &[OutputFormat::Dot]);

    let written = renderer.render(&diagram).expect("Failed to render");
    assert_eq!(written, vec![temp_dir.path().join("static_site.dot")]);
    assert!(!fs::read(&written[0]).unwrap().is_empty());
}

#[test]
fn test_diagram_formats_used_without_configuration() {
    let renderer = Renderer::default();
    let diagram = static_site(false);

    assert_eq!(renderer.formats_for(&diagram), &[OutputFormat::Png]);
    assert_eq!(
        renderer.output_path(&diagram, OutputFormat::Png),
        std::path::PathBuf::from("static_site.png")
    );
}

#[test]
fn test_missing_output_directory_is_created() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let nested = temp_dir.path().join("out").join("diagrams");
    let renderer = dot_only_renderer(&nested);

    let written = renderer.render(&static_site(false)).unwrap();
    assert!(written[0].starts_with(&nested));
    assert!(written[0].is_file());
}

#[test]
fn test_dangling_edge_fails_before_writing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let renderer = dot_only_renderer(temp_dir.path());

    let diagram = DiagramBuilder::new("Broken").build(|d| {
        d.node("api", aws::API_GATEWAY, "API");
        d.push_edge(Edge::new(Id::new("api"), Id::new("renderer_test_ghost")));
    });

    let err = renderer.render(&diagram).unwrap_err();
    assert!(matches!(err, StratusError::Validation(ref issues) if issues.len() == 1));
    assert!(err.to_string().contains("renderer_test_ghost"));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_adding_a_node_keeps_existing_edges() {
    let renderer = Renderer::default();

    let before = renderer.render_dot(&static_site(false)).unwrap();
    let after = renderer.render_dot(&static_site(true)).unwrap();

    assert_ne!(before, after);
    assert_eq!(edge_lines(&before), edge_lines(&after));
}

#[test]
fn test_invalid_style_color_is_config_error() {
    let style: StyleConfig = toml::from_str("font_color = \"not-a-color\"").unwrap();
    let renderer = Renderer::new(AppConfig::new(OutputConfig::default(), style));

    let err = renderer.render_dot(&static_site(false)).unwrap_err();
    assert!(matches!(err, StratusError::Config(_)));
}

#[test]
fn test_render_to_ignores_configured_directory() {
    let configured = tempdir().expect("Failed to create temp directory");
    let target = tempdir().expect("Failed to create temp directory");
    let renderer = dot_only_renderer(configured.path());

    let written = renderer.render_to(&static_site(false), target.path()).unwrap();

    assert_eq!(written, vec![target.path().join("static_site.dot")]);
    assert_eq!(fs::read_dir(configured.path()).unwrap().count(), 0);
}
