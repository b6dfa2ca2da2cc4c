//! Configuration types for diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from TOML.
//! Every field is optional; anything left unset falls back to the renderer
//! defaults, so an empty file is a valid configuration.
//!
//! - [`AppConfig`] - top-level configuration combining output and style.
//! - [`OutputConfig`] - where rendered files go and in which formats.
//! - [`StyleConfig`] - fonts and colors applied to every diagram.
//!
//! ```
//! # use stratus::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().font_name(), "Sans-Serif");
//! assert!(config.output().formats().is_empty());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use stratus_core::{color::Color, semantic::OutputFormat};

use crate::error::StratusError;

const DEFAULT_FONT_NAME: &str = "Sans-Serif";
const DEFAULT_FONT_SIZE: f32 = 15.0;
const DEFAULT_FONT_COLOR: &str = "#2D3436";
const DEFAULT_EDGE_COLOR: &str = "#7B8894";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    output: OutputConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(output: OutputConfig, style: StyleConfig) -> Self {
        Self { output, style }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Output location and formats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory rendered files are written to; the working directory if unset.
    #[serde(default)]
    directory: Option<PathBuf>,

    /// Formats to render; an empty list keeps the formats the diagram declares.
    #[serde(default)]
    formats: Vec<OutputFormat>,
}

impl OutputConfig {
    pub fn new(directory: Option<PathBuf>, formats: Vec<OutputFormat>) -> Self {
        Self { directory, formats }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = Some(directory.into());
    }

    pub fn set_formats(&mut self, formats: Vec<OutputFormat>) {
        self.formats = formats;
    }
}

/// Fonts and colors applied to every diagram.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    font_name: Option<String>,

    /// Title font size; node, cluster and edge fonts scale from it.
    #[serde(default)]
    font_size: Option<f32>,

    #[serde(default)]
    font_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background color, or `None` for the Graphviz default.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Config`] if the configured string is not a color.
    pub fn background_color(&self) -> Result<Option<Color>, StratusError> {
        self.background_color
            .as_deref()
            .map(|value| parse_color("background_color", value))
            .transpose()
    }

    pub fn font_name(&self) -> &str {
        self.font_name.as_deref().unwrap_or(DEFAULT_FONT_NAME)
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
            .filter(|size| *size > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// # Errors
    ///
    /// Returns [`StratusError::Config`] if the configured string is not a color.
    pub fn font_color(&self) -> Result<Color, StratusError> {
        parse_color(
            "font_color",
            self.font_color.as_deref().unwrap_or(DEFAULT_FONT_COLOR),
        )
    }

    /// # Errors
    ///
    /// Returns [`StratusError::Config`] if the configured string is not a color.
    pub fn edge_color(&self) -> Result<Color, StratusError> {
        parse_color(
            "edge_color",
            self.edge_color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR),
        )
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, StratusError> {
    Color::new(value).map_err(|err| StratusError::Config(format!("style.{field}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.font_name(), "Sans-Serif");
        assert_eq!(style.font_size(), 15.0);
        assert_eq!(style.font_color().unwrap().to_hex(), "#2d3436");
        assert_eq!(style.edge_color().unwrap().to_hex(), "#7b8894");
        assert!(style.background_color().unwrap().is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r#"
            [output]
            directory = "out"
            formats = ["svg", "dot"]

            [style]
            background_color = "white"
            font_name = "Helvetica"
            font_size = 18.0
            edge_color = "rgb(10, 20, 30)"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.output().directory(), Some(Path::new("out")));
        assert_eq!(
            config.output().formats(),
            &[OutputFormat::Svg, OutputFormat::Dot]
        );
        assert_eq!(config.style().font_name(), "Helvetica");
        assert_eq!(config.style().font_size(), 18.0);
        assert_eq!(
            config.style().background_color().unwrap().map(|c| c.to_hex()),
            Some("#ffffff".to_string())
        );
        assert_eq!(config.style().edge_color().unwrap().to_hex(), "#0a141e");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").expect("empty config");
        assert!(config.output().directory().is_none());
        assert_eq!(config.style().font_size(), 15.0);
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config: AppConfig =
            toml::from_str("[style]\nfont_color = \"chartreuse-ish\"").expect("parses as TOML");
        let err = config.style().font_color().unwrap_err();
        assert!(matches!(err, StratusError::Config(_)));
        assert!(err.to_string().contains("style.font_color"));
    }

    #[test]
    fn test_non_positive_font_size_falls_back() {
        let config: AppConfig = toml::from_str("[style]\nfont_size = 0.0").expect("parses");
        assert_eq!(config.style().font_size(), 15.0);
    }
}
