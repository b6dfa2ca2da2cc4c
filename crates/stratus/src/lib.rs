//! Stratus - architecture diagrams as code, rendered by Graphviz.
//!
//! A diagram is declared with [`builder::DiagramBuilder`], linted, translated
//! to DOT and handed to the Graphviz `dot` executable, which owns layout and
//! image output.

pub mod config;
pub mod export;
pub mod validate;

mod error;

pub use stratus_core::{builder, color, identifier, kind, semantic, style};

pub use error::StratusError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use config::AppConfig;
use export::{Exporter, dot::DotSourceExporter, graphviz::GraphvizExporter};
use semantic::{Diagram, OutputFormat};
use validate::LintReport;

/// Lints and renders diagrams with one configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use stratus::{Renderer, builder::DiagramBuilder, kind::aws};
///
/// let diagram = DiagramBuilder::new("Static Site").build(|d| {
///     let cdn = d.node("cdn", aws::CLOUDFRONT, "CDN");
///     let bucket = d.node("bucket", aws::S3, "Assets");
///     d.connect(cdn, bucket);
/// });
///
/// let renderer = Renderer::default();
/// let written = renderer.render(&diagram).expect("Failed to render");
/// println!("wrote {}", written[0].display());
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the static checks on `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Validation`] if any blocking issue is found.
    /// Warnings are logged and returned in the report.
    pub fn lint(&self, diagram: &Diagram) -> Result<LintReport, StratusError> {
        info!(diagram = diagram.name(); "Linting diagram");
        let report = validate::validate(diagram)?;
        debug!(warnings = report.warnings().count(); "Lint passed");
        Ok(report)
    }

    /// Lints `diagram` and returns its DOT source.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Validation`] for lint failures and
    /// [`StratusError::Config`] for unparsable style colors.
    pub fn render_dot(&self, diagram: &Diagram) -> Result<String, StratusError> {
        self.lint(diagram)?;
        export::dot::render_dot(diagram, self.config.style())
    }

    /// Formats that [`Renderer::render`] will write: the configured formats if
    /// any, otherwise the diagram's own.
    pub fn formats_for<'a>(&'a self, diagram: &'a Diagram) -> &'a [OutputFormat] {
        match self.config.output().formats() {
            [] => diagram.formats(),
            configured => configured,
        }
    }

    /// Output path of `diagram` in `format`.
    ///
    /// Relative to the working directory unless an output directory is configured.
    pub fn output_path(&self, diagram: &Diagram, format: OutputFormat) -> PathBuf {
        Self::path_in(self.config.output().directory(), diagram, format)
    }

    fn path_in(directory: Option<&Path>, diagram: &Diagram, format: OutputFormat) -> PathBuf {
        let file_name = format!("{}.{}", diagram.filename(), format.extension());
        match directory {
            Some(directory) => directory.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Lints `diagram` and writes one file per output format into the
    /// configured output directory.
    ///
    /// Returns the written paths in format order.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Validation`] for lint failures,
    /// [`StratusError::Io`] if the output directory cannot be created, and
    /// [`StratusError::Export`] if a backend fails (for example when Graphviz
    /// is not installed). Files written before the failure are kept.
    pub fn render(&self, diagram: &Diagram) -> Result<Vec<PathBuf>, StratusError> {
        self.render_into(diagram, self.config.output().directory())
    }

    /// Same as [`Renderer::render`], but writes into `directory` regardless of
    /// the configured one.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render`].
    pub fn render_to(
        &self,
        diagram: &Diagram,
        directory: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, StratusError> {
        self.render_into(diagram, Some(directory.as_ref()))
    }

    fn render_into(
        &self,
        diagram: &Diagram,
        directory: Option<&Path>,
    ) -> Result<Vec<PathBuf>, StratusError> {
        let dot_source = self.render_dot(diagram)?;

        if let Some(directory) = directory {
            fs::create_dir_all(directory)?;
        }

        let exporters: [&dyn Exporter; 2] = [&DotSourceExporter, &GraphvizExporter];
        let mut written = Vec::new();

        for &format in self.formats_for(diagram) {
            let path = Self::path_in(directory, diagram, format);
            let exporter = exporters
                .iter()
                .find(|exporter| exporter.supports(format))
                .ok_or(export::Error::Unsupported(format))?;

            exporter.export(&dot_source, format, &path)?;
            info!(output_file = path.display().to_string(); "Diagram exported");
            written.push(path);
        }

        Ok(written)
    }
}
