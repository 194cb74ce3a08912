//! JSON run summary.

use crate::error::Result;
use crate::types::RunSummary;

/// JSON formatter for [`RunSummary`].
pub struct JsonSummary {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonSummary {
    /// Create a new JSON formatter.
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serialize `summary`.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if serialization fails.
    pub fn format(&self, summary: &RunSummary) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(summary)
        } else {
            serde_json::to_string(summary)
        };

        json.map_err(|e| crate::err!(Serialize {
            message: e.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexSummary;
    use std::path::PathBuf;

    #[test]
    fn test_json_summary() {
        let summary = RunSummary {
            report_path: None,
            index_path: Some(PathBuf::from("out/index.html")),
            stats: None,
            index: Some(IndexSummary { count: 3, total_bytes: 900 }),
            generated_at: "2026-10-17 09:30:00".to_string(),
        };

        let json = JsonSummary::new(false).format(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["index_path"], "out/index.html");
        assert_eq!(value["index"]["count"], 3);
        assert_eq!(value["index"]["total_bytes"], 900);
        assert!(value["report_path"].is_null());
    }
}
