//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `generate`: Write the markdown report, then the HTML index (default)
//! - `report`: Write only the markdown report
//! - `index`: Write only the HTML index page
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Report on the default output/test_output directory
//! mdcss-report
//!
//! # Report on another run, writing the documents elsewhere
//! mdcss-report generate --input-dir runs/latest --output-dir site
//!
//! # Only rebuild the index page
//! mdcss-report index --allow-empty
//!
//! # Initialize configuration
//! mdcss-report init
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mdcss-report - test report and index generator for markdown-css theme output.
#[derive(Parser, Debug)]
#[command(
    name = "mdcss-report",
    author,
    version,
    about = "Test report and index page generator for markdown-css theme output",
    long_about = "mdcss-report scans a directory of test_<theme>.html files produced by the \
                  markdown-css converter, computes file-size statistics and writes a markdown \
                  report plus a self-contained HTML index page."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "MDCSS_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run (defaults to `generate`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run, `generate` with default arguments when omitted.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Generate(PathArgs::default()))
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the markdown report and then the HTML index
    #[command(visible_alias = "g")]
    Generate(PathArgs),

    /// Write only the markdown report
    Report(PathArgs),

    /// Write only the HTML index page
    Index(PathArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Location overrides shared by the generating commands.
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Directory containing test_<theme>.html result files
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory to write the report and index into (defaults to the input directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory containing <theme>.css sources
    #[arg(long, value_name = "DIR")]
    pub css_dir: Option<PathBuf>,

    /// Sample document the converter was run against
    #[arg(long, value_name = "FILE")]
    pub source_document: Option<PathBuf>,

    /// Render documents even when no result files are found
    #[arg(long)]
    pub allow_empty: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "mdcss-report.yaml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_generate() {
        let cli = Cli::parse_from(["mdcss-report"]);
        match cli.into_command() {
            Commands::Generate(args) => {
                assert!(args.input_dir.is_none());
                assert!(!args.allow_empty);
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let cli = Cli::parse_from([
            "mdcss-report",
            "generate",
            "--input-dir",
            "runs/latest",
            "--output-dir",
            "site",
            "--css-dir",
            "themes",
            "--allow-empty",
            "--json",
        ]);
        match cli.into_command() {
            Commands::Generate(args) => {
                assert_eq!(args.input_dir, Some(PathBuf::from("runs/latest")));
                assert_eq!(args.output_dir, Some(PathBuf::from("site")));
                assert_eq!(args.css_dir, Some(PathBuf::from("themes")));
                assert!(args.allow_empty);
                assert!(args.json);
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn test_report_and_index_commands() {
        let cli = Cli::parse_from(["mdcss-report", "report", "-i", "out"]);
        assert!(matches!(cli.into_command(), Commands::Report(_)));

        let cli = Cli::parse_from(["mdcss-report", "index"]);
        assert!(matches!(cli.into_command(), Commands::Index(_)));
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["mdcss-report", "validate", "custom.yaml"]);
        match cli.into_command() {
            Commands::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("custom.yaml"));
            }
            other => panic!("Expected Validate command, got {other:?}"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "mdcss-report",
            "-vv",
            "--config",
            "custom.yaml",
            "generate",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["mdcss-report", "g"]);
        assert!(matches!(cli.into_command(), Commands::Generate(_)));
    }
}
