//! Export of a diagram to files.
//!
//! The diagram is first translated to DOT text ([`dot`]); an [`Exporter`]
//! then turns that text into a file of one [`OutputFormat`].
//!
//! ```text
//! Diagram
//!     ↓ lint (crate::validate)
//! Diagram (known good)
//!     ↓ dot
//! DOT text
//!     ↓ exporter (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`dot::DotSourceExporter`] writes the DOT text itself.
//! - [`graphviz::GraphvizExporter`] runs Graphviz `dot` for PNG, JPG, SVG and PDF.
//!
//! Every backend writes through [`write_atomically`], so a failed export
//! never leaves a truncated file at the destination.

pub mod dot;
pub mod graphviz;

use std::{fs, io, path::Path};

use log::debug;
use thiserror::Error;

use stratus_core::semantic::OutputFormat;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// True if this backend can produce `format`.
    fn supports(&self, format: OutputFormat) -> bool;

    /// Renders `dot_source` as `format` into `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the backend fails or the file cannot be written.
    fn export(&self, dot_source: &str, format: OutputFormat, path: &Path) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`StratusError::Export`](crate::StratusError::Export) at the
/// crate boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Graphviz `dot` executable not found; install Graphviz and make sure `dot` is on PATH")]
    GraphvizMissing,

    #[error("Graphviz failed to render {format}: {message}")]
    Graphviz {
        format: OutputFormat,
        message: String,
    },

    #[error("no exporter supports the {0} format")]
    Unsupported(OutputFormat),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writes `path` via a temp file in the same directory.
///
/// `write` receives the temp file path and must leave the complete output
/// there. The temp file replaces `path` only if `write` succeeds and produced
/// a non-empty file.
///
/// # Errors
///
/// Returns the error from `write`, or [`Error::Io`] if the temp file cannot be
/// created or persisted.
pub fn write_atomically(
    path: &Path,
    write: impl FnOnce(&Path) -> Result<(), Error>,
) -> Result<(), Error> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let temp = tempfile::Builder::new()
        .prefix(".stratus-")
        .suffix(&suffix)
        .tempfile_in(directory)?;

    write(temp.path())?;

    let written = fs::metadata(temp.path())?.len();
    if written == 0 {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("exporter produced an empty file for {}", path.display()),
        )));
    }

    temp.persist(path).map_err(|err| Error::Io(err.error))?;
    debug!(path = path.display().to_string(), bytes = written; "Output file written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomically_persists_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dot");

        write_atomically(&path, |temp| Ok(fs::write(temp, "digraph {}")?)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "digraph {}");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let result = write_atomically(&path, |temp| {
            fs::write(temp, "partial")?;
            Err(Error::GraphvizMissing)
        });

        assert!(matches!(result, Err(Error::GraphvizMissing)));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_output_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");

        let result = write_atomically(&path, |_| Ok(()));

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
    }
}
