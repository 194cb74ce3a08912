//! Self-contained HTML index page generator.
//!
//! The page embeds its stylesheet and links every card to its result file
//! with a path relative to the page itself, so the output directory can be
//! opened from disk or served as-is.

use crate::config::Config;
use crate::discovery::RESULT_PATTERN;
use crate::error::Result;
use crate::reporter::{group_thousands, DocumentGenerator};
use crate::types::{IndexSummary, ResultFile};
use askama::Template;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Component, Path, PathBuf};

/// HTML index generator.
pub struct HtmlIndexReporter {
    title: String,
    environment: String,
    input_dir: PathBuf,
    link_base: PathBuf,
    allow_empty: bool,
    generated_at: String,
}

impl HtmlIndexReporter {
    /// Create a generator for results scanned from `input_dir`, for a page
    /// that will live in `link_base`.
    #[must_use]
    pub fn new(config: &Config, input_dir: &Path, link_base: &Path, generated_at: String) -> Self {
        Self {
            title: config.report.title.clone(),
            environment: config.report.environment.clone(),
            input_dir: input_dir.to_path_buf(),
            link_base: link_base.to_path_buf(),
            allow_empty: config.report.allow_empty,
            generated_at,
        }
    }
}

impl DocumentGenerator for HtmlIndexReporter {
    fn generate(&self, files: &[ResultFile]) -> Result<String> {
        if files.is_empty() && !self.allow_empty {
            return Err(crate::err!(EmptyResultSet {
                dir: self.input_dir.clone(),
                pattern: RESULT_PATTERN.to_string(),
            }));
        }

        let summary = IndexSummary::from_files(files);
        let template = IndexTemplate {
            title: &self.title,
            environment: &self.environment,
            generated_at: &self.generated_at,
            count: summary.count,
            total_size: group_thousands(summary.total_bytes),
            cards: files
                .iter()
                .map(|file| ThemeCard {
                    theme_name: file.theme_name.clone(),
                    size: group_thousands(file.size_bytes),
                    href: relative_href(&self.link_base, &file.path),
                })
                .collect(),
        };

        template.render().map_err(|e| crate::err!(TemplateRender {
            template: "index.html",
            message: e.to_string(),
        }))
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    environment: &'a str,
    generated_at: &'a str,
    count: usize,
    total_size: String,
    cards: Vec<ThemeCard>,
}

struct ThemeCard {
    theme_name: String,
    size: String,
    href: String,
}

/// Characters escaped inside one path segment of a card link.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// Link from a page in `from_dir` to `target`, percent-encoded with `/`
/// separators.
///
/// Paths with `..` components, or one absolute and one relative path, are
/// resolved against the working directory first. Falls back to the encoded
/// absolute target when the two paths share no root.
fn relative_href(from_dir: &Path, target: &Path) -> String {
    let needs_resolving = from_dir.is_absolute() != target.is_absolute()
        || has_parent_dir(from_dir)
        || has_parent_dir(target);

    let (from_dir, target) = if needs_resolving {
        match (std::path::absolute(from_dir), std::path::absolute(target)) {
            (Ok(from), Ok(to)) => (normalize(&from), normalize(&to)),
            _ => return encode_path(target.components()),
        }
    } else {
        (from_dir.to_path_buf(), target.to_path_buf())
    };

    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let rooted = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    if from[common..].iter().any(rooted) || to[common..].iter().any(rooted) {
        return encode_path(target.components());
    }

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(to[common..].iter().map(encode_component));
    parts.join("/")
}

fn has_parent_dir(path: &Path) -> bool {
    path.components().any(|c| matches!(c, Component::ParentDir))
}

/// Drop `.` and fold `..` into the preceding component, without touching
/// the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn encode_component(component: &Component<'_>) -> String {
    match component {
        Component::Normal(name) => utf8_percent_encode(&name.to_string_lossy(), SEGMENT).to_string(),
        Component::RootDir => String::new(),
        other => other.as_os_str().to_string_lossy().into_owned(),
    }
}

fn encode_path<'a>(components: impl Iterator<Item = Component<'a>>) -> String {
    components
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| encode_component(&c))
        .collect::<Vec<_>>()
        .join("/")
}
