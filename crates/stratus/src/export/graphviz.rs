//! Image export through the Graphviz `dot` executable.
//!
//! Layout and rasterization are entirely Graphviz's job; this backend only
//! pipes DOT text in and points `dot` at a temp file.

use std::{io, path::Path};

use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec_dot,
};
use log::{debug, info};

use stratus_core::semantic::OutputFormat;

use super::{Error, Exporter, write_atomically};

/// Runs Graphviz `dot` for raster and vector image formats.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphvizExporter;

impl GraphvizExporter {
    fn graphviz_format(format: OutputFormat) -> Option<Format> {
        match format {
            OutputFormat::Png => Some(Format::Png),
            OutputFormat::Jpg => Some(Format::Jpg),
            OutputFormat::Svg => Some(Format::Svg),
            OutputFormat::Pdf => Some(Format::Pdf),
            OutputFormat::Dot => None,
        }
    }
}

impl Exporter for GraphvizExporter {
    fn supports(&self, format: OutputFormat) -> bool {
        Self::graphviz_format(format).is_some()
    }

    fn export(&self, dot_source: &str, format: OutputFormat, path: &Path) -> Result<(), Error> {
        let graphviz_format = Self::graphviz_format(format).ok_or(Error::Unsupported(format))?;

        info!(format:% = format, path = path.display().to_string(); "Running Graphviz");
        write_atomically(path, |temp| {
            let args = vec![
                CommandArg::Format(graphviz_format),
                CommandArg::Output(temp.to_string_lossy().to_string()),
            ];
            let stdout = exec_dot(dot_source.to_string(), args).map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => Error::GraphvizMissing,
                _ => Error::Graphviz {
                    format,
                    message: err.to_string(),
                },
            })?;
            debug!(stdout_bytes = stdout.len(); "Graphviz finished");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats() {
        let exporter = GraphvizExporter;
        assert!(exporter.supports(OutputFormat::Png));
        assert!(exporter.supports(OutputFormat::Jpg));
        assert!(exporter.supports(OutputFormat::Svg));
        assert!(exporter.supports(OutputFormat::Pdf));
        assert!(!exporter.supports(OutputFormat::Dot));
    }

    #[test]
    fn test_dot_format_is_rejected_before_running_graphviz() {
        let dir = tempfile::tempdir().unwrap();
        let err = GraphvizExporter
            .export("digraph {}", OutputFormat::Dot, &dir.path().join("x.dot"))
            .unwrap_err();

        assert!(matches!(err, Error::Unsupported(OutputFormat::Dot)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
