//! # mdcss-report
//!
//! Test report and index page generator for the markdown-css theme converter.
//!
//! The converter writes one `test_<theme>.html` file per theme. This crate
//! scans those results, computes file-size statistics and writes two static
//! documents next to them:
//!
//! - **`TEST_REPORT.md`**: per-theme size table, totals, average, largest and
//!   smallest output, feature checklist and usage notes
//! - **`index.html`**: a self-contained page with one card per theme linking
//!   to its result file
//!
//! ## Example
//!
//! ```rust,no_run
//! use mdcss_report::{Config, Generator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let summary = Generator::new(config).run()?;
//!
//!     if let Some(report) = &summary.report_path {
//!         println!("Report: {}", report.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use discovery::{discover_result_files, theme_name_from_file_name};
pub use error::{ReportError, Result};
pub use types::{AggregateStats, IndexSummary, ResultFile, RunSummary, SizeEntry};

use reporter::Reporter;

/// Runs the report and index builders against the configured paths.
///
/// # Example
///
/// ```rust,no_run
/// use mdcss_report::{Config, Generator};
///
/// let mut config = Config::default();
/// config.paths.input_dir = "runs/latest".into();
/// config.paths.output_dir = Some("site".into());
///
/// let summary = Generator::new(config).run()?;
/// println!("{} themes", summary.index.map_or(0, |i| i.count));
/// # Ok::<(), mdcss_report::ReportError>(())
/// ```
pub struct Generator {
    config: Config,
    reporter: Reporter,
}

impl Generator {
    /// Create a generator stamping documents with the current time.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let reporter = Reporter::new(&config);
        Self { config, reporter }
    }

    /// Create a generator around an existing reporter.
    #[must_use]
    pub fn with_reporter(config: Config, reporter: Reporter) -> Self {
        Self { config, reporter }
    }

    /// Write the markdown report, then the HTML index.
    ///
    /// # Errors
    ///
    /// Returns the first error hit. A failure while building the report
    /// leaves both documents untouched.
    pub fn run(&self) -> Result<RunSummary> {
        let mut summary = self.run_report()?;
        let index = self.run_index()?;
        summary.index_path = index.index_path;
        summary.index = index.index;
        Ok(summary)
    }

    /// Write only the markdown report.
    ///
    /// # Errors
    ///
    /// See [`Reporter::generate_report`].
    pub fn run_report(&self) -> Result<RunSummary> {
        let input_dir = &self.config.paths.input_dir;
        tracing::info!(dir = %input_dir.display(), "Generating test report");

        let outcome = self
            .reporter
            .generate_report(input_dir, &self.config.report_path())?;

        Ok(RunSummary {
            report_path: Some(outcome.path),
            stats: outcome.stats,
            generated_at: self.reporter.timestamp(),
            ..RunSummary::default()
        })
    }

    /// Write only the HTML index.
    ///
    /// # Errors
    ///
    /// See [`Reporter::generate_index`].
    pub fn run_index(&self) -> Result<RunSummary> {
        let input_dir = &self.config.paths.input_dir;
        tracing::info!(dir = %input_dir.display(), "Generating index page");

        let outcome = self
            .reporter
            .generate_index(input_dir, &self.config.index_path())?;

        Ok(RunSummary {
            index_path: Some(outcome.path),
            index: Some(outcome.summary),
            generated_at: self.reporter.timestamp(),
            ..RunSummary::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_writes_both_documents() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("test_simple.html"), "<p>simple</p>").unwrap();

        let mut config = Config::default();
        config.paths.input_dir = dir.path().to_path_buf();
        config.paths.output_dir = Some(dir.path().to_path_buf());
        config.paths.css_dir = None;

        let summary = Generator::new(config).run().unwrap();

        assert!(summary.report_path.unwrap().is_file());
        assert!(summary.index_path.unwrap().is_file());
        assert_eq!(summary.stats.unwrap().total_bytes, 13);
        assert_eq!(summary.index.unwrap().count, 1);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.paths.input_dir = dir.path().join("absent");
        config.paths.output_dir = Some(dir.path().join("site"));

        let err = Generator::new(config).run().unwrap_err();
        assert!(matches!(err, ReportError::DirectoryNotFound { .. }));
        assert!(!dir.path().join("site").exists());
    }
}
