use std::{fs, path::Path, process::Command};

use tempfile::tempdir;

use stratus::semantic::OutputFormat;
use stratus_cli::{Args, completion_message, run};

fn args_for(output_dir: &Path, formats: Vec<OutputFormat>) -> Args {
    Args {
        output_dir: Some(output_dir.to_string_lossy().to_string()),
        formats,
        config: None,
        log_level: "off".to_string(),
        check: false,
    }
}

fn graphviz_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn e2e_smoke_test_dot_source() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let written = run(&args_for(temp_dir.path(), vec![OutputFormat::Dot]))
        .expect("Rendering DOT source should not need Graphviz");

    assert_eq!(
        written,
        vec![temp_dir.path().join("aws_infrastructure_diagram.dot")]
    );

    let source = fs::read_to_string(&written[0]).expect("Failed to read output");
    assert!(source.starts_with("digraph"));
    assert!(source.contains("ilikeyacut AWS Infrastructure"));
    assert!(source.contains("subgraph cluster_0"));
}

#[test]
fn e2e_smoke_test_output_is_reproducible() {
    let first_dir = tempdir().expect("Failed to create temp directory");
    let second_dir = tempdir().expect("Failed to create temp directory");

    let first = run(&args_for(first_dir.path(), vec![OutputFormat::Dot])).unwrap();
    let second = run(&args_for(second_dir.path(), vec![OutputFormat::Dot])).unwrap();

    assert_eq!(
        fs::read(&first[0]).unwrap(),
        fs::read(&second[0]).unwrap()
    );
}

#[test]
fn e2e_smoke_test_rerun_overwrites() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("aws_infrastructure_diagram.dot");
    fs::write(&path, "stale").unwrap();

    run(&args_for(temp_dir.path(), vec![OutputFormat::Dot])).unwrap();

    let source = fs::read_to_string(&path).unwrap();
    assert_ne!(source, "stale");
    assert!(source.starts_with("digraph"));
}

#[test]
fn e2e_smoke_test_check_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = args_for(temp_dir.path(), vec![OutputFormat::Dot]);
    args.check = true;

    let written = run(&args).expect("The diagram should lint cleanly");

    assert!(written.is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn e2e_smoke_test_png() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    if !graphviz_available() {
        let err = run(&args_for(temp_dir.path(), Vec::new()))
            .expect_err("PNG rendering needs Graphviz");
        assert!(err.is_missing_graphviz());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
        return;
    }

    let written = run(&args_for(temp_dir.path(), Vec::new())).expect("Failed to render PNG");

    let expected = temp_dir.path().join("aws_infrastructure_diagram.png");
    assert_eq!(written, vec![expected.clone()]);

    let bytes = fs::read(&expected).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
    assert_eq!(
        completion_message(&expected),
        format!("AWS infrastructure diagram generated as '{}'", expected.display())
    );
}
