//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{ColloquyArgs, OutputFormat};
use crate::error::Result;
use crate::ml::intent_classifier::LabelScore;

/// Result structure for a single reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResult {
    pub message: String,
    pub reply: String,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub message: String,
    pub intent: Option<String>,
    pub confidence: Option<f64>,
    pub ranking: Vec<LabelScore>,
}

/// Dataset statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetStats {
    pub intents: usize,
    pub distinct_tags: usize,
    pub patterns: usize,
    pub responses: usize,
    pub duplicate_tags: Vec<String>,
    pub tags_without_patterns: Vec<String>,
    pub tags_without_responses: Vec<String>,
    pub table_rows: Option<usize>,
    pub table_columns: Option<Vec<String>>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &ColloquyArgs,
) -> Result<()> {
    let mut out = io::stdout().lock();
    write_result(
        &mut out,
        message,
        result,
        args.output_format,
        args.pretty,
        args.verbosity(),
    )?;
    Ok(())
}

/// Write a result in the specified format to `out`.
pub fn write_result<T: Serialize, W: Write>(
    out: &mut W,
    message: &str,
    result: &T,
    format: OutputFormat,
    pretty: bool,
    verbosity: u8,
) -> io::Result<()> {
    let value = serde_json::to_value(result)?;
    match format {
        OutputFormat::Human => write_human(out, message, &value, verbosity),
        OutputFormat::Json => write_json(out, &value, pretty),
    }
}

/// Output in human-readable format.
fn write_human<W: Write>(
    out: &mut W,
    message: &str,
    value: &Value,
    verbosity: u8,
) -> io::Result<()> {
    if verbosity > 0 && !message.is_empty() {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }

    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        writeln!(out, "{key}:")?;
                        for item in items {
                            writeln!(out, "  - {}", format_value(item))?;
                        }
                    }
                    _ => writeln!(out, "{key}: {}", format_value(val))?,
                }
            }
        }
        _ => writeln!(out, "{}", format_value(value))?,
    }
    Ok(())
}

/// Output in JSON format.
fn write_json<W: Write>(out: &mut W, value: &Value, pretty: bool) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    writeln!(out, "{json}")
}

/// Format a JSON value for human output.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}: {}", format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "-".to_string(),
    }
}
