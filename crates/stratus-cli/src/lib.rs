//! CLI logic for the ilikeyacut infrastructure diagram.
//!
//! Loads configuration, applies the command-line overrides and renders the
//! fixed topology from [`topology`].

pub mod error_adapter;
pub mod topology;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use stratus::{Renderer, StratusError};

/// Run the diagram CLI.
///
/// Returns the paths of the written files in format order. With
/// `--check` nothing is written and the returned list is empty.
///
/// # Errors
///
/// Returns `StratusError` for:
/// - Configuration loading errors
/// - Lint failures
/// - File I/O errors
/// - Graphviz export errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, StratusError> {
    info!(
        output_dir:? = args.output_dir,
        formats:? = args.formats,
        check = args.check;
        "Generating diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(directory) = &args.output_dir {
        app_config.output_mut().set_directory(directory);
    }
    if !args.formats.is_empty() {
        app_config.output_mut().set_formats(args.formats.clone());
    }

    let diagram = topology::ilikeyacut_infrastructure();
    let renderer = Renderer::new(app_config);

    if args.check {
        let report = renderer.lint(&diagram)?;
        info!(warnings = report.warnings().count(); "Check passed");
        return Ok(Vec::new());
    }

    renderer.render(&diagram)
}

/// Message printed once per written file.
pub fn completion_message(path: &Path) -> String {
    format!("AWS infrastructure diagram generated as '{}'", path.display())
}
