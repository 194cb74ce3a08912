//! Core data types for mdcss-report.
//!
//! - [`ResultFile`]: one discovered `test_<theme>.html` artifact
//! - [`AggregateStats`]: totals, average and extremes over the discovered set
//! - [`IndexSummary`]: the count/total pair shown on the index page
//! - [`RunSummary`]: what a full run produced, for console and JSON output

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An HTML artifact produced by the converter for one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFile {
    /// Full path to the result file
    pub path: PathBuf,

    /// Bare file name (`test_simple.html`)
    pub file_name: String,

    /// Theme name derived from the file name (`simple`)
    pub theme_name: String,

    /// Size of the result file in bytes
    pub size_bytes: u64,

    /// Size of the companion `<theme>.css`, 0 when there is none
    pub css_size_bytes: u64,
}

/// A theme name paired with a byte size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    /// Theme that owns the size
    pub theme_name: String,
    /// Size in bytes
    pub size_bytes: u64,
}

impl SizeEntry {
    fn of(file: &ResultFile) -> Self {
        Self {
            theme_name: file.theme_name.clone(),
            size_bytes: file.size_bytes,
        }
    }
}

/// Aggregate statistics over a non-empty set of result files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Sum of all result file sizes
    pub total_bytes: u64,

    /// Number of result files
    pub count: usize,

    /// `total_bytes / count`, rounded down
    pub average_bytes: u64,

    /// Largest result file
    pub largest: SizeEntry,

    /// Smallest result file
    pub smallest: SizeEntry,
}

impl AggregateStats {
    /// Compute statistics over `files`.
    ///
    /// Ties for largest/smallest go to the first file in slice order, which
    /// is sorted filename order for anything returned by discovery.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyResultSet`](crate::error::ReportError::EmptyResultSet)
    /// when `files` is empty; `dir` and `pattern` only feed the message.
    pub fn compute(files: &[ResultFile], dir: &Path, pattern: &str) -> Result<Self> {
        let Some(first) = files.first() else {
            return Err(crate::err!(EmptyResultSet {
                dir: dir.to_path_buf(),
                pattern: pattern.to_string(),
            }));
        };

        let mut total_bytes = 0u64;
        let mut largest = first;
        let mut smallest = first;
        for file in files {
            total_bytes += file.size_bytes;
            if file.size_bytes > largest.size_bytes {
                largest = file;
            }
            if file.size_bytes < smallest.size_bytes {
                smallest = file;
            }
        }

        let count = files.len();
        let stats = Self {
            total_bytes,
            count,
            average_bytes: total_bytes / count as u64,
            largest: SizeEntry::of(largest),
            smallest: SizeEntry::of(smallest),
        };

        tracing::debug!(
            count = stats.count,
            total_bytes = stats.total_bytes,
            average_bytes = stats.average_bytes,
            "Computed aggregate statistics"
        );

        Ok(stats)
    }
}

/// Count and total size shown on the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Number of result files
    pub count: usize,
    /// Sum of all result file sizes
    pub total_bytes: u64,
}

impl IndexSummary {
    /// Summarize `files`. Valid for an empty slice.
    #[must_use]
    pub fn from_files(files: &[ResultFile]) -> Self {
        Self {
            count: files.len(),
            total_bytes: files.iter().map(|f| f.size_bytes).sum(),
        }
    }
}

/// Outcome of a complete generator run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Path of the markdown report, if it was generated
    pub report_path: Option<PathBuf>,

    /// Path of the HTML index, if it was generated
    pub index_path: Option<PathBuf>,

    /// Statistics of the report run (absent for empty sets)
    pub stats: Option<AggregateStats>,

    /// Index page count/total
    pub index: Option<IndexSummary>,

    /// Local timestamp embedded in the documents
    pub generated_at: String,
}
