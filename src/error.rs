//! Error types for mdcss-report.
//!
//! Every failure the generator can hit is a variant of [`ReportError`].
//! Variants carry the source location where they were raised so that a
//! failed run points straight at the offending step.
//!
//! # Error Categories
//!
//! - **Input errors**: missing result directory, empty result set
//! - **IO errors**: unreadable result files, unwritable output locations
//! - **Config errors**: invalid configuration files or values
//! - **Render errors**: template failures
//!
//! # Example
//!
//! ```rust
//! use mdcss_report::error::{ReportError, Result};
//!
//! fn read_sample(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).map_err(|e| ReportError::Io {
//!         path: path.into(),
//!         source: e,
//!         src_path: file!(),
//!         src_line: line!(),
//!     })
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(EmptyResultSet { dir: input_dir.to_path_buf(), pattern: RESULT_PATTERN.to_string() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::ReportError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for report generation.
pub type Result<T> = std::result::Result<T, ReportError>;

/// The main error type for mdcss-report.
#[derive(Error, Debug)]
pub enum ReportError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The directory expected to hold result files does not exist.
    #[error("Directory not found: {path} ({src_path}:{src_line})")]
    DirectoryNotFound {
        /// The missing directory path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// No file in the input directory matched the result pattern.
    #[error("No result files matching '{pattern}' in {dir} ({src_path}:{src_line})")]
    EmptyResultSet {
        /// The scanned directory
        dir: PathBuf,
        /// The pattern that found nothing
        pattern: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// A glob pattern could not be compiled.
    #[error("Invalid file pattern '{pattern}' ({src_path}:{src_line}): {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// A generated document could not be written.
    #[error("Failed to write '{path}' ({src_path}:{src_line}): {source}")]
    OutputWrite {
        /// The output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Render Errors
    // =========================================================================
    /// Template rendering error.
    #[error("Template rendering error in {template} ({src_path}:{src_line}): {message}")]
    TemplateRender {
        /// Template name
        template: &'static str,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Run summary serialization error.
    #[error("Failed to serialize run summary ({src_path}:{src_line}): {message}")]
    Serialize {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl ReportError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>, src_path: &'static str, src_line: u32) -> Self {
        Self::ConfigParse { message, source, src_path, src_line }
    }

    /// Returns `true` for the empty result set condition.
    #[must_use]
    pub const fn is_empty_set(&self) -> bool {
        matches!(self, Self::EmptyResultSet { .. })
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } | Self::OutputWrite { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::DirectoryNotFound { .. } => 15,
            Self::EmptyResultSet { .. } => 16,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            _ => 1,
        }
    }
}

/// Extension trait for `Result` to attach path context to I/O errors.
pub trait ResultExt<T> {
    /// Wraps an I/O error into [`ReportError::Io`] for `path`.
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;

    /// Wraps an I/O error into [`ReportError::OutputWrite`] for `path`.
    fn with_output_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| ReportError::Io {
            path: path.into(),
            source,
            src_path: file!(),
            src_line: line!(),
        })
    }

    fn with_output_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| ReportError::OutputWrite {
            path: path.into(),
            source,
            src_path: file!(),
            src_line: line!(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        let missing = crate::err!(DirectoryNotFound { path: PathBuf::from("nowhere") });
        assert_eq!(missing.exit_code(), 15);

        let empty = crate::err!(EmptyResultSet {
            dir: PathBuf::from("out"),
            pattern: "test_*.html".to_string(),
        });
        assert_eq!(empty.exit_code(), 16);
        assert!(empty.is_empty_set());

        let denied = ReportError::OutputWrite {
            path: PathBuf::from("out/index.html"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            src_path: file!(),
            src_line: line!(),
        };
        assert_eq!(denied.exit_code(), 13);
    }

    #[test]
    fn test_with_path_keeps_source() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("themes/markdown.html").unwrap_err();

        match err {
            ReportError::Io { path, source, .. } => {
                assert_eq!(path, PathBuf::from("themes/markdown.html"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_message_names_pattern() {
        let empty = crate::err!(EmptyResultSet {
            dir: PathBuf::from("output/test_output"),
            pattern: "test_*.html".to_string(),
        });
        let message = empty.to_string();
        assert!(message.contains("test_*.html"));
        assert!(message.contains("output/test_output"));
    }
}
