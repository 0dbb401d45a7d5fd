//! Auxiliary tabular dataset.
//!
//! The presentation layer may show a read-only table next to the chat. The
//! classification pipeline never reads it; this module only loads and
//! validates the `{"table": [{...}, ...]}` document with the same soft-failure
//! contract as the intents loader.

use std::fs;
use std::path::Path;

use log::info;
use serde_json::{Map, Value};

use crate::error::{ColloquyError, Result};
use crate::intent::store::report_load_error;

/// One table row: a flat mapping of column name to value.
pub type TableRow = Map<String, Value>;

/// Rows of the auxiliary dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<TableRow>) -> Self {
        Table { rows }
    }

    /// Column names of the first row, in source order.
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All rows.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a table document, failing on the first structural problem.
pub fn try_parse_table(content: &str) -> Result<Table> {
    let mut document: Value = serde_json::from_str(content)?;

    let entries = match document.get_mut("table") {
        Some(Value::Array(entries)) => std::mem::take(entries),
        Some(_) => return Err(ColloquyError::dataset("'table' must be a list")),
        None => {
            return Err(ColloquyError::dataset(
                "JSON document must contain a 'table' key",
            ));
        }
    };

    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Value::Object(row) => Ok(row),
            _ => Err(ColloquyError::dataset(format!(
                "each entry in 'table' must be an object (entry #{idx} is not)"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::new(rows))
}

/// Read and parse a table file, failing on the first problem.
pub fn try_load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let content = fs::read_to_string(path.as_ref())?;
    try_parse_table(&content)
}

/// Parse a table document, returning an empty table on error.
pub fn parse_table(content: &str) -> Table {
    match try_parse_table(content) {
        Ok(table) => {
            info!("Loaded table with {} rows", table.len());
            table
        }
        Err(e) => {
            report_load_error("<inline>", &e);
            Table::default()
        }
    }
}

/// Load a table file, returning an empty table on error.
pub fn load_table<P: AsRef<Path>>(path: P) -> Table {
    let path = path.as_ref();
    match try_load_table(path) {
        Ok(table) => {
            info!(
                "Loaded table with {} rows from {}",
                table.len(),
                path.display()
            );
            table
        }
        Err(e) => {
            report_load_error(&path.display().to_string(), &e);
            Table::default()
        }
    }
}
