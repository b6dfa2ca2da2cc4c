//! Command-line argument definitions.
//!
//! Every argument is optional. Running without any reproduces the fixed
//! behavior: a 300 DPI PNG named `aws_infrastructure_diagram.png` in the
//! working directory.

use clap::Parser;

use stratus::semantic::OutputFormat;

/// Render the ilikeyacut AWS infrastructure diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to write the diagram into (defaults to the working directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Output format; repeat for several (png, jpg, svg, pdf, dot)
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Lint the diagram without writing any file
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["ilikeyacut-diagram"]).unwrap();
        assert!(args.output_dir.is_none());
        assert!(args.formats.is_empty());
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "warn");
        assert!(!args.check);
    }

    #[test]
    fn test_repeated_formats() {
        let args =
            Args::try_parse_from(["ilikeyacut-diagram", "-f", "svg", "--format", "dot"]).unwrap();
        assert_eq!(args.formats, vec![OutputFormat::Svg, OutputFormat::Dot]);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["ilikeyacut-diagram", "--format", "gif"]).is_err());
    }
}
