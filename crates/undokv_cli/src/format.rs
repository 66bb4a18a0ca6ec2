//! Rendering of reported outputs.

use clap::ValueEnum;
use serde::Serialize;
use undokv_core::{Output, StatsSnapshot, NO_TRANSACTION};

/// How reported outputs are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `10`, `NULL`, `2`, `NO TRANSACTION`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON shape of a reported output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonOutput<'a> {
    Value { value: Option<&'a str> },
    Count { count: usize },
    Status { status: &'static str },
}

/// Renders an output, or `None` if it is not reported.
pub fn render_output(output: &Output, format: OutputFormat) -> serde_json::Result<Option<String>> {
    if !output.is_reported() {
        return Ok(None);
    }
    match format {
        OutputFormat::Text => Ok(Some(output.to_string())),
        OutputFormat::Json => {
            let json = match output {
                Output::Value(value) => JsonOutput::Value {
                    value: Some(value.as_str()),
                },
                Output::Null => JsonOutput::Value { value: None },
                Output::Count(count) => JsonOutput::Count { count: *count },
                Output::NoTransaction => JsonOutput::Status {
                    status: NO_TRANSACTION,
                },
                Output::None => return Ok(None),
            };
            serde_json::to_string(&json).map(Some)
        }
    }
}

/// Renders engine statistics.
pub fn render_stats(stats: &StatsSnapshot, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(stats),
        OutputFormat::Text => {
            let rows = [
                ("GET", stats.gets),
                ("SET", stats.sets),
                ("DELETE", stats.deletes),
                ("COUNT", stats.counts),
                ("BEGIN", stats.begins),
                ("COMMIT", stats.commits),
                ("ROLLBACK", stats.rollbacks),
                ("  no transaction", stats.empty_rollbacks),
                ("  replayed", stats.replayed),
            ];
            let mut text = String::from("=== Engine Statistics ===");
            for (label, value) in rows {
                text.push_str(&format!("\n{label:<18} {value}"));
            }
            Ok(text)
        }
    }
}
