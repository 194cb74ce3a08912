//! Configuration module for mdcss-report.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`mdcss-report.yaml`)
//! - Environment variables (`${VAR}` expansion inside the YAML)
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # mdcss-report.yaml
//!
//! paths:
//!   input_dir: output/test_output
//!   output_dir: site          # defaults to input_dir
//!   css_dir: themes
//!   source_document: themes/markdown.html
//!
//! report:
//!   report_file: TEST_REPORT.md
//!   index_file: index.html
//!   title: markdown-css Theme Test Report
//!   environment: ${RUNTIME_LABEL}
//!   allow_empty: false
//!
//! output:
//!   colored: true
//!   json: false
//! ```

use crate::discovery::{theme_name_from_file_name, RESULT_PATTERN};
use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where result files are read from and documents are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Directory scanned for `test_*.html` result files.
    pub input_dir: PathBuf,

    /// Directory the report and index are written to, `input_dir` when unset.
    pub output_dir: Option<PathBuf>,

    /// Directory holding `<theme>.css` sources, used to annotate sizes.
    pub css_dir: Option<PathBuf>,

    /// Sample document fed to the converter, reported in the input section.
    pub source_document: Option<PathBuf>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("output/test_output"),
            output_dir: None,
            css_dir: Some(PathBuf::from("themes")),
            source_document: Some(PathBuf::from("themes/markdown.html")),
        }
    }
}

/// Document options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// File name of the markdown report inside `output_dir`.
    pub report_file: String,

    /// File name of the HTML index inside `output_dir`.
    pub index_file: String,

    /// Title used by both documents.
    pub title: String,

    /// Label of the environment the converter ran in.
    pub environment: String,

    /// Render documents for an empty result set instead of failing.
    pub allow_empty: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            report_file: "TEST_REPORT.md".to_string(),
            index_file: "index.html".to_string(),
            title: "markdown-css Theme Test Report".to_string(),
            environment: "Python3".to_string(),
            allow_empty: false,
        }
    }
}

/// Console output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    pub colored: bool,

    /// Print the run summary as JSON instead of a table.
    pub json: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: true,
            json: false,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations
    pub paths: PathOptions,

    /// Document options
    pub report: ReportOptions,

    /// Console output options
    pub output: OutputOptions,
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value fails validation.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        let expanded = expand_env_vars(content);

        let config: Self = serde_yaml::from_str(&expanded).map_err(|e| {
            ReportError::config_parse(e.to_string(), Some(Box::new(e)), file!(), line!())
        })?;
        config.validate()?;

        tracing::debug!(
            input_dir = %config.paths.input_dir.display(),
            output_dir = %config.output_dir().display(),
            allow_empty = config.report.allow_empty,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReportError::io(path, e, file!(), line!()))?;
        Self::from_yaml(&content)
    }

    /// Check that both output file names are plain file names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValue` for empty names or names containing separators.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("report.report_file", &self.report.report_file),
            ("report.index_file", &self.report.index_file),
        ] {
            if value.trim().is_empty() {
                return Err(crate::err!(ConfigValue {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                }));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(crate::err!(ConfigValue {
                    key: key.to_string(),
                    message: format!("'{value}' must be a file name, not a path"),
                }));
            }
            // Documents are written next to the results and must not be picked up as one.
            if theme_name_from_file_name(value).is_some() {
                return Err(crate::err!(ConfigValue {
                    key: key.to_string(),
                    message: format!("'{value}' matches the result file pattern {RESULT_PATTERN}"),
                }));
            }
        }

        if self.report.report_file == self.report.index_file {
            return Err(crate::err!(ConfigValue {
                key: "report.index_file".to_string(),
                message: "must differ from report.report_file".to_string(),
            }));
        }

        Ok(())
    }

    /// Directory the documents are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.paths.output_dir.as_deref().unwrap_or(&self.paths.input_dir)
    }

    /// Full path of the markdown report.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_dir().join(&self.report.report_file)
    }

    /// Full path of the HTML index.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.output_dir().join(&self.report.index_file)
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# mdcss-report configuration file

# Input and output locations (relative to the working directory)
paths:
  # Directory containing the converter's test_<theme>.html results
  input_dir: output/test_output

  # Directory the report and index page are written to (defaults to input_dir)
  # output_dir: site

  # Directory with the <theme>.css sources (omit to skip CSS sizes)
  css_dir: themes

  # Sample document the converter was run against
  source_document: themes/markdown.html

# Generated documents
report:
  report_file: TEST_REPORT.md
  index_file: index.html
  title: markdown-css Theme Test Report

  # Label shown as the test environment (can use an environment variable)
  environment: Python3
  # environment: ${RUNTIME_LABEL}

  # Render an empty report/index instead of failing when nothing matched
  allow_empty: false

# Console output
output:
  colored: true
  json: false
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::PathArgs) {
        if let Some(ref dir) = args.input_dir {
            self.paths.input_dir = dir.clone();
        }
        if let Some(ref dir) = args.output_dir {
            self.paths.output_dir = Some(dir.clone());
        }
        if let Some(ref dir) = args.css_dir {
            self.paths.css_dir = Some(dir.clone());
        }
        if let Some(ref doc) = args.source_document {
            self.paths.source_document = Some(doc.clone());
        }
        if args.allow_empty {
            self.report.allow_empty = true;
        }
        if args.json {
            self.output.json = true;
        }
        if args.no_color {
            self.output.colored = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. Unknown variables are left as-is.
fn expand_env_vars(content: &str) -> String {
    let lookup = |caps: &regex::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    };

    let braced = regex::Regex::new(r"\$\{([^}]+)\}").expect("static regex");
    let expanded = braced.replace_all(content, lookup);

    // The greedy name match keeps `$HOME` from matching inside `$HOMEDIR`.
    let bare = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("static regex");
    bare.replace_all(&expanded, lookup).into_owned()
}
