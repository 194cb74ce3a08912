//! Document generation module.
//!
//! Two documents are generated from the discovered result files:
//! - Markdown: the test report with per-theme rows and aggregate statistics
//! - HTML: a self-contained index page with one card per result file
//!
//! A run is summarized on the console by the [`SummaryFormatter`] as a text
//! table or as JSON.
//!
//! Rendering is split in two steps. Statistics are computed into the types
//! in [`crate::types`], then turned into view models rendered by the
//! `askama` templates under `templates/`.
//!
//! # Example
//!
//! ```rust,no_run
//! use mdcss_report::reporter::Reporter;
//! use mdcss_report::Config;
//! use std::path::Path;
//!
//! let config = Config::default();
//! let reporter = Reporter::new(&config);
//!
//! let report = reporter.generate_report(Path::new("output/test_output"), &config.report_path())?;
//! println!("{}", report.path.display());
//! # Ok::<(), mdcss_report::ReportError>(())
//! ```

mod html;
mod json;
mod markdown;
mod text;

use crate::config::Config;
use crate::discovery::discover_result_files;
use crate::error::{ResultExt, Result};
use crate::types::{AggregateStats, IndexSummary, ResultFile};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

pub use html::HtmlIndexReporter;
pub use json::JsonSummary;
pub use markdown::MarkdownReporter;
pub use text::SummaryFormatter;

/// Timestamp format embedded in both documents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trait for document generators.
pub trait DocumentGenerator {
    /// Render a document for `files`, which must be in discovery order.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty and the document requires at
    /// least one file, or if template rendering fails.
    fn generate(&self, files: &[ResultFile]) -> Result<String>;
}

/// A written markdown report.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Where the report was written
    pub path: PathBuf,
    /// Statistics in the report, `None` for an allowed empty set
    pub stats: Option<AggregateStats>,
}

/// A written HTML index.
#[derive(Debug, Clone)]
pub struct IndexOutcome {
    /// Where the index was written
    pub path: PathBuf,
    /// Count and total size shown on the page
    pub summary: IndexSummary,
}

/// Discovers result files and writes both documents.
///
/// Each `generate_*` call scans the input directory on its own.
pub struct Reporter {
    config: Config,
    generated_at: DateTime<Local>,
}

impl Reporter {
    /// Create a reporter stamping documents with the current local time.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_timestamp(config, Local::now())
    }

    /// Create a reporter with a fixed timestamp.
    #[must_use]
    pub fn with_timestamp(config: &Config, generated_at: DateTime<Local>) -> Self {
        Self {
            config: config.clone(),
            generated_at,
        }
    }

    /// The timestamp as it appears in the documents.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Scan `input_dir` and write the markdown report to `output_path`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` for a missing input directory,
    /// `EmptyResultSet` when nothing matched (unless empty sets are
    /// allowed), and `OutputWrite` when the report cannot be written.
    /// Nothing is written when an error is returned.
    pub fn generate_report(&self, input_dir: &Path, output_path: &Path) -> Result<ReportOutcome> {
        let files = discover_result_files(input_dir, self.config.paths.css_dir.as_deref())?;

        let generator = MarkdownReporter::new(&self.config, input_dir, self.timestamp());
        let (markdown, stats) = generator.generate_with_stats(&files)?;

        write_atomic(output_path, &markdown)?;
        tracing::info!(path = %output_path.display(), themes = files.len(), "Report written");

        Ok(ReportOutcome {
            path: output_path.to_path_buf(),
            stats,
        })
    }

    /// Scan `input_dir` and write the HTML index to `output_path`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Reporter::generate_report`].
    pub fn generate_index(&self, input_dir: &Path, output_path: &Path) -> Result<IndexOutcome> {
        let files = discover_result_files(input_dir, self.config.paths.css_dir.as_deref())?;

        let link_base = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let generator = HtmlIndexReporter::new(&self.config, input_dir, link_base, self.timestamp());
        let html = generator.generate(&files)?;

        write_atomic(output_path, &html)?;
        tracing::info!(path = %output_path.display(), cards = files.len(), "Index page written");

        Ok(IndexOutcome {
            path: output_path.to_path_buf(),
            summary: IndexSummary::from_files(&files),
        })
    }
}

/// Write `contents` to `path` through a temp file in the same directory.
///
/// The target is replaced in one rename, so readers never see a partially
/// written document. Missing parent directories are created.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).with_output_path(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir).with_output_path(path)?;
    temp.write_all(contents.as_bytes()).with_output_path(path)?;
    temp.flush().with_output_path(path)?;

    // Temp files are created owner-only; generated documents are meant to be shared.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_output_path(path)?;
    }

    temp.persist(path).map_err(|e| e.error).with_output_path(path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote document");
    Ok(())
}

/// Format a byte count with `,` thousands separators (`12345` -> `12,345`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
