//! Result file discovery.
//!
//! Both generated documents start from the same scan: list the input
//! directory, keep the entries whose names match [`RESULT_PATTERN`], derive
//! the theme name from each file name and read its size. The scan is not
//! recursive and always yields files in lexicographic file-name order.

use crate::error::{ResultExt, Result};
use crate::types::ResultFile;
use std::path::Path;

/// File name prefix of a converter result.
pub const RESULT_PREFIX: &str = "test_";

/// File name suffix of a converter result.
pub const RESULT_SUFFIX: &str = ".html";

/// Glob matched against file names in the input directory.
pub const RESULT_PATTERN: &str = "test_*.html";

/// Extension of the theme stylesheets in the CSS directory.
pub const CSS_EXTENSION: &str = "css";

/// Derive the theme name from a result file name.
///
/// `test_wecatch-code.html` yields `wecatch-code`. Only the leading prefix
/// and trailing suffix are removed; anything in between is kept verbatim.
/// Returns `None` when the name does not have both or the stem is empty.
#[must_use]
pub fn theme_name_from_file_name(file_name: &str) -> Option<&str> {
    let theme = file_name
        .strip_prefix(RESULT_PREFIX)?
        .strip_suffix(RESULT_SUFFIX)?;
    (!theme.is_empty()).then_some(theme)
}

/// Discover the result files in `input_dir`, sorted by file name.
///
/// When `css_dir` is given, each result is annotated with the size of
/// `<css_dir>/<theme>.css` (0 when that file does not exist).
///
/// # Errors
///
/// Returns `DirectoryNotFound` if `input_dir` is not a directory and `Io`
/// if the directory or a matching file cannot be read. An empty result is
/// not an error here; the callers decide how to treat it.
pub fn discover_result_files(input_dir: &Path, css_dir: Option<&Path>) -> Result<Vec<ResultFile>> {
    if !input_dir.is_dir() {
        return Err(crate::err!(DirectoryNotFound {
            path: input_dir.to_path_buf(),
        }));
    }

    let pattern = glob::Pattern::new(RESULT_PATTERN).map_err(|e| crate::err!(InvalidPattern {
        pattern: RESULT_PATTERN.to_string(),
        message: e.to_string(),
    }))?;

    tracing::debug!(dir = %input_dir.display(), pattern = RESULT_PATTERN, "Scanning for result files");

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir).with_path(input_dir)? {
        let entry = entry.with_path(input_dir)?;
        let path = entry.path();

        let Some(file_name) = entry.file_name().to_str().map(String::from) else {
            tracing::warn!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };

        if !pattern.matches(&file_name) {
            continue;
        }

        // Follow symlinks so linked results are reported like copied ones.
        let metadata = std::fs::metadata(&path).with_path(&path)?;
        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }

        let Some(theme_name) = theme_name_from_file_name(&file_name).map(String::from) else {
            tracing::warn!(path = %path.display(), "Skipping result file without a theme name");
            continue;
        };

        let css_size_bytes = css_dir.map_or(0, |dir| css_size(dir, &theme_name));

        tracing::debug!(
            theme = %theme_name,
            size_bytes = metadata.len(),
            css_size_bytes,
            "Found result file"
        );

        files.push(ResultFile {
            path,
            file_name,
            theme_name,
            size_bytes: metadata.len(),
            css_size_bytes,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::info!(dir = %input_dir.display(), count = files.len(), "Discovered result files");
    Ok(files)
}

/// Size of `<css_dir>/<theme>.css`, 0 when it is missing or not a file.
fn css_size(css_dir: &Path, theme_name: &str) -> u64 {
    let css_path = css_dir.join(format!("{theme_name}.{CSS_EXTENSION}"));
    match std::fs::metadata(&css_path) {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, len: usize) {
        fs::write(dir.join(name), "x".repeat(len)).unwrap();
    }

    #[test]
    fn test_theme_name_extraction() {
        assert_eq!(theme_name_from_file_name("test_simple.html"), Some("simple"));
        assert_eq!(theme_name_from_file_name("test_wecatch-code.html"), Some("wecatch-code"));
        assert_eq!(theme_name_from_file_name("test_list_writing.html"), Some("list_writing"));
        assert_eq!(theme_name_from_file_name("test_.html"), None);
        assert_eq!(theme_name_from_file_name("simple.html"), None);
        assert_eq!(theme_name_from_file_name("test_simple.htm"), None);
    }

    #[test]
    fn test_discovery_sorts_and_filters() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "test_wecatch.html", 30);
        write(dir.path(), "test_apollo.html", 10);
        write(dir.path(), "test_less.html", 20);
        write(dir.path(), "index.html", 99);
        write(dir.path(), "TEST_REPORT.md", 99);
        write(dir.path(), "test_notes.txt", 99);
        fs::create_dir(dir.path().join("test_dir.html")).unwrap();

        let files = discover_result_files(dir.path(), None).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.theme_name.as_str()).collect();
        assert_eq!(names, vec!["apollo", "less", "wecatch"]);
        assert_eq!(files[0].size_bytes, 10);
        assert_eq!(files[0].file_name, "test_apollo.html");
        assert!(files.iter().all(|f| f.css_size_bytes == 0));
    }

    #[test]
    fn test_css_sizes_are_optional() {
        let results = TempDir::new().unwrap();
        let themes = TempDir::new().unwrap();
        write(results.path(), "test_simple.html", 100);
        write(results.path(), "test_ocean.html", 200);
        write(themes.path(), "simple.css", 7);

        let files = discover_result_files(results.path(), Some(themes.path())).unwrap();
        let ocean = files.iter().find(|f| f.theme_name == "ocean").unwrap();
        let simple = files.iter().find(|f| f.theme_name == "simple").unwrap();
        assert_eq!(ocean.css_size_bytes, 0);
        assert_eq!(simple.css_size_bytes, 7);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = discover_result_files(&dir.path().join("absent"), None).unwrap_err();
        assert!(matches!(err, crate::error::ReportError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(discover_result_files(dir.path(), None).unwrap().is_empty());
    }
}
