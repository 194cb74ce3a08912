//! Markdown test report generator.

use crate::config::Config;
use crate::discovery::RESULT_PATTERN;
use crate::error::Result;
use crate::reporter::{group_thousands, DocumentGenerator};
use crate::types::{AggregateStats, ResultFile};
use askama::Template;
use std::path::{Path, PathBuf};

/// Placeholder for values that cannot be computed.
const NOT_AVAILABLE: &str = "n/a";

/// Markdown report generator.
pub struct MarkdownReporter {
    title: String,
    environment: String,
    source_document: Option<PathBuf>,
    input_dir: PathBuf,
    allow_empty: bool,
    generated_at: String,
}

impl MarkdownReporter {
    /// Create a generator for results scanned from `input_dir`.
    #[must_use]
    pub fn new(config: &Config, input_dir: &Path, generated_at: String) -> Self {
        Self {
            title: config.report.title.clone(),
            environment: config.report.environment.clone(),
            source_document: config.paths.source_document.clone(),
            input_dir: input_dir.to_path_buf(),
            allow_empty: config.report.allow_empty,
            generated_at,
        }
    }

    /// Aggregate statistics for `files`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResultSet` for an empty slice unless empty sets are
    /// allowed, in which case the statistics are `None`.
    pub fn stats(&self, files: &[ResultFile]) -> Result<Option<AggregateStats>> {
        match AggregateStats::compute(files, &self.input_dir, RESULT_PATTERN) {
            Ok(stats) => Ok(Some(stats)),
            Err(e) if e.is_empty_set() && self.allow_empty => {
                tracing::warn!(dir = %self.input_dir.display(), "No result files, rendering empty report");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Display path and size of the sample document.
    fn source_document_view(&self) -> (String, String) {
        let Some(path) = &self.source_document else {
            return (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string());
        };

        let size = match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => format!("{} bytes", group_thousands(metadata.len())),
            _ => {
                tracing::debug!(path = %path.display(), "Sample document not found");
                NOT_AVAILABLE.to_string()
            }
        };
        (path.display().to_string(), size)
    }
}

impl DocumentGenerator for MarkdownReporter {
    fn generate(&self, files: &[ResultFile]) -> Result<String> {
        self.generate_with_stats(files).map(|(markdown, _)| markdown)
    }
}

impl MarkdownReporter {
    /// Render the report and return it with the statistics it shows.
    ///
    /// # Errors
    ///
    /// See [`DocumentGenerator::generate`].
    pub fn generate_with_stats(&self, files: &[ResultFile]) -> Result<(String, Option<AggregateStats>)> {
        let stats = self.stats(files)?;
        let (source_document, source_size) = self.source_document_view();

        let template = ReportTemplate {
            title: &self.title,
            generated_at: &self.generated_at,
            environment: &self.environment,
            source_document,
            source_size,
            output_dir: self.input_dir.display().to_string(),
            theme_count: files.len(),
            status: if stats.is_some() { "✅ all passed" } else { "⚠️ no result files" },
            rows: files.iter().map(ReportRow::from).collect(),
            stats: StatsView::from(stats.as_ref()),
        };

        let markdown = template.render().map_err(|e| crate::err!(TemplateRender {
            template: "report.md",
            message: e.to_string(),
        }))?;

        Ok((markdown, stats))
    }
}

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct ReportTemplate<'a> {
    title: &'a str,
    generated_at: &'a str,
    environment: &'a str,
    source_document: String,
    source_size: String,
    output_dir: String,
    theme_count: usize,
    status: &'static str,
    rows: Vec<ReportRow>,
    stats: StatsView,
}

/// One table row of the results section.
struct ReportRow {
    theme_name: String,
    size: String,
    css_size: String,
}

impl From<&ResultFile> for ReportRow {
    fn from(file: &ResultFile) -> Self {
        Self {
            theme_name: file.theme_name.replace('|', "\\|"),
            size: group_thousands(file.size_bytes),
            css_size: group_thousands(file.css_size_bytes),
        }
    }
}

/// Pre-formatted aggregate statistics.
struct StatsView {
    total: String,
    average: String,
    largest: String,
    smallest: String,
}

impl From<Option<&AggregateStats>> for StatsView {
    fn from(stats: Option<&AggregateStats>) -> Self {
        match stats {
            Some(stats) => Self {
                total: format!("{} bytes", group_thousands(stats.total_bytes)),
                average: format!("{} bytes", group_thousands(stats.average_bytes)),
                largest: format!(
                    "{} theme ({} bytes)",
                    stats.largest.theme_name,
                    group_thousands(stats.largest.size_bytes)
                ),
                smallest: format!(
                    "{} theme ({} bytes)",
                    stats.smallest.theme_name,
                    group_thousands(stats.smallest.size_bytes)
                ),
            },
            None => Self {
                total: "0 bytes".to_string(),
                average: NOT_AVAILABLE.to_string(),
                largest: NOT_AVAILABLE.to_string(),
                smallest: NOT_AVAILABLE.to_string(),
            },
        }
    }
}
