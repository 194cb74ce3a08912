//! Console summary of a generator run.

use crate::config::Config;
use crate::reporter::group_thousands;
use crate::types::RunSummary;
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Text summary formatter for CLI output.
pub struct SummaryFormatter {
    /// Whether to use colors
    use_colors: bool,
}

impl SummaryFormatter {
    /// Create a new summary formatter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
        }
    }

    /// Format the completion summary.
    #[must_use]
    pub fn format(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push_str(&self.format_documents(summary));

        if let Some(stats_table) = self.format_stats(summary) {
            output.push('\n');
            output.push_str(&stats_table);
            output.push('\n');
        }

        if let Some(index_path) = &summary.index_path {
            let hint = format!("Open {} in a browser to browse every result.", index_path.display());
            output.push('\n');
            if self.use_colors {
                output.push_str(&hint.dimmed().to_string());
            } else {
                output.push_str(&hint);
            }
            output.push('\n');
        }

        output
    }

    fn format_header(&self) -> String {
        let title = "Done";
        if self.use_colors {
            format!("\n{}\n{}\n", title.bright_green().bold(), "=".repeat(60).bright_blue())
        } else {
            format!("\n{}\n{}\n", title, "=".repeat(60))
        }
    }

    fn format_documents(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        for (label, path) in [
            ("Test report", &summary.report_path),
            ("Index page", &summary.index_path),
        ] {
            if let Some(path) = path {
                let label = if self.use_colors {
                    label.bright_cyan().to_string()
                } else {
                    label.to_string()
                };
                output.push_str(&format!("  {label}: {}\n", path.display()));
            }
        }
        output
    }

    /// Statistics table, `None` when the run produced no statistics.
    fn format_stats(&self, summary: &RunSummary) -> Option<String> {
        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Metric", "Value"]);

        if let Some(stats) = &summary.stats {
            table.add_row(vec![Cell::new("Themes"), self.number_cell(stats.count.to_string())]);
            table.add_row(vec![
                Cell::new("Total output"),
                self.number_cell(format!("{} bytes", group_thousands(stats.total_bytes))),
            ]);
            table.add_row(vec![
                Cell::new("Average output"),
                self.number_cell(format!("{} bytes", group_thousands(stats.average_bytes))),
            ]);
            table.add_row(vec![
                Cell::new("Largest"),
                Cell::new(format!(
                    "{} ({} bytes)",
                    stats.largest.theme_name,
                    group_thousands(stats.largest.size_bytes)
                )),
            ]);
            table.add_row(vec![
                Cell::new("Smallest"),
                Cell::new(format!(
                    "{} ({} bytes)",
                    stats.smallest.theme_name,
                    group_thousands(stats.smallest.size_bytes)
                )),
            ]);
        } else if let Some(index) = &summary.index {
            table.add_row(vec![Cell::new("Themes"), self.number_cell(index.count.to_string())]);
            table.add_row(vec![
                Cell::new("Total output"),
                self.number_cell(format!("{} bytes", group_thousands(index.total_bytes))),
            ]);
        } else {
            return None;
        }

        Some(table.to_string())
    }

    fn number_cell(&self, value: String) -> Cell {
        if self.use_colors {
            Cell::new(value).fg(Color::Green)
        } else {
            Cell::new(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AggregateStats, IndexSummary, SizeEntry};
    use std::path::PathBuf;

    fn plain_config() -> Config {
        let mut config = Config::default();
        config.output.colored = false;
        config
    }

    #[test]
    fn test_summary_lists_documents_and_stats() {
        let summary = RunSummary {
            report_path: Some(PathBuf::from("out/TEST_REPORT.md")),
            index_path: Some(PathBuf::from("out/index.html")),
            stats: Some(AggregateStats {
                total_bytes: 6000,
                count: 2,
                average_bytes: 3000,
                largest: SizeEntry { theme_name: "ocean".to_string(), size_bytes: 5000 },
                smallest: SizeEntry { theme_name: "less".to_string(), size_bytes: 1000 },
            }),
            index: Some(IndexSummary { count: 2, total_bytes: 6000 }),
            generated_at: "2026-10-17 09:30:00".to_string(),
        };

        let text = SummaryFormatter::new(&plain_config()).format(&summary);
        assert!(text.contains("Test report: out/TEST_REPORT.md"));
        assert!(text.contains("Index page: out/index.html"));
        assert!(text.contains("3,000 bytes"));
        assert!(text.contains("ocean (5,000 bytes)"));
    }

    #[test]
    fn test_index_only_summary() {
        let summary = RunSummary {
            index_path: Some(PathBuf::from("out/index.html")),
            index: Some(IndexSummary { count: 3, total_bytes: 12 }),
            ..RunSummary::default()
        };

        let text = SummaryFormatter::new(&plain_config()).format(&summary);
        assert!(!text.contains("Test report"));
        assert!(text.contains("12 bytes"));
    }
}
