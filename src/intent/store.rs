//! Loading the intents dataset.
//!
//! The expected document is
//!
//! ```json
//! {"intents": [{"tag": "greeting", "patterns": ["hello"], "responses": ["Hi!"]}]}
//! ```
//!
//! The `try_*` functions return a [`Result`]. [`load_intents`] and
//! [`parse_intents`] never fail: on any error they log a diagnostic and
//! return an empty collection, leaving it to the caller to decide whether an
//! empty dataset is fatal.

use std::fs;
use std::io;
use std::path::Path;

use log::{error, info};
use serde_json::Value;

use crate::error::{ColloquyError, Result};
use crate::intent::types::Intent;

const REQUIRED_FIELDS: [&str; 3] = ["tag", "patterns", "responses"];

/// Parse an intents document, failing on the first structural problem.
pub fn try_parse_intents(content: &str) -> Result<Vec<Intent>> {
    let document: Value = serde_json::from_str(content)?;

    let entries = document
        .get("intents")
        .ok_or_else(|| ColloquyError::dataset("JSON document must contain an 'intents' key"))?
        .as_array()
        .ok_or_else(|| ColloquyError::dataset("'intents' must be a list"))?;

    let mut intents = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let object = entry
            .as_object()
            .ok_or_else(|| ColloquyError::dataset(format!("intent #{idx} is not an object")))?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|k| !object.contains_key(**k)) {
            return Err(ColloquyError::dataset(format!(
                "intent #{idx} is missing the '{missing}' key; each intent must contain 'tag', 'patterns', and 'responses'"
            )));
        }

        let intent: Intent = serde_json::from_value(entry.clone())?;
        if intent.tag.trim().is_empty() {
            return Err(ColloquyError::dataset(format!(
                "intent #{idx} has an empty tag"
            )));
        }
        intents.push(intent);
    }

    Ok(intents)
}

/// Read and parse an intents file, failing on the first problem.
pub fn try_load_intents<P: AsRef<Path>>(path: P) -> Result<Vec<Intent>> {
    let content = fs::read_to_string(path.as_ref())?;
    try_parse_intents(&content)
}

/// Parse an intents document, returning an empty collection on error.
pub fn parse_intents(content: &str) -> Vec<Intent> {
    match try_parse_intents(content) {
        Ok(intents) => {
            info!("Loaded {} intents", intents.len());
            intents
        }
        Err(e) => {
            report_load_error("<inline>", &e);
            Vec::new()
        }
    }
}

/// Load an intents file, returning an empty collection on error.
///
/// # Examples
///
/// ```no_run
/// use colloquy::intent::load_intents;
///
/// let intents = load_intents("data/intents.json");
/// if intents.is_empty() {
///     eprintln!("Failed to load intents");
/// }
/// ```
pub fn load_intents<P: AsRef<Path>>(path: P) -> Vec<Intent> {
    let path = path.as_ref();
    match try_load_intents(path) {
        Ok(intents) => {
            info!(
                "Loaded {} intents from {}",
                intents.len(),
                path.display()
            );
            intents
        }
        Err(e) => {
            report_load_error(&path.display().to_string(), &e);
            Vec::new()
        }
    }
}

/// Log a soft load failure with a message matching its cause.
pub(crate) fn report_load_error(source: &str, e: &ColloquyError) {
    match e {
        ColloquyError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            error!("The file {source} was not found");
        }
        ColloquyError::Json(json_err) if json_err.is_syntax() || json_err.is_eof() => {
            error!("The file {source} is not a valid JSON file: {json_err}");
        }
        _ => error!("Error in JSON structure of {source}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "intents": [
            {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!"]},
            {"tag": "bye", "patterns": ["goodbye", "see you"], "responses": ["Bye!"]},
            {"tag": "silent", "patterns": [], "responses": [], "context": "ignored"}
        ]
    }"#;

    #[test]
    fn test_parse_valid_document() {
        let intents = try_parse_intents(VALID).unwrap();
        assert_eq!(intents.len(), 3);
        assert_eq!(intents[0].tag, "greeting");
        assert_eq!(intents[0].patterns, vec!["hello", "hi there"]);
        assert!(intents[2].responses.is_empty());
        assert!(intents.iter().all(|i| !i.tag.is_empty()));
    }

    #[test]
    fn test_missing_intents_key() {
        let err = try_parse_intents(r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, ColloquyError::Dataset(_)));
        assert!(parse_intents(r#"{"data": []}"#).is_empty());
    }

    #[test]
    fn test_missing_field() {
        let content = r#"{"intents": [{"tag": "greeting", "patterns": ["hello"]}]}"#;
        let err = try_parse_intents(content).unwrap_err();
        assert!(err.to_string().contains("'responses'"));
        assert!(parse_intents(content).is_empty());
    }

    #[test]
    fn test_invalid_syntax() {
        let err = try_parse_intents("{\"intents\": [").unwrap_err();
        assert!(matches!(err, ColloquyError::Json(_)));
        assert!(parse_intents("{\"intents\": [").is_empty());
    }

    #[test]
    fn test_wrong_field_type() {
        let content = r#"{"intents": [{"tag": "greeting", "patterns": "hello", "responses": []}]}"#;
        assert!(matches!(
            try_parse_intents(content).unwrap_err(),
            ColloquyError::Json(_)
        ));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let content = r#"{"intents": [{"tag": " ", "patterns": [], "responses": []}]}"#;
        assert!(matches!(
            try_parse_intents(content).unwrap_err(),
            ColloquyError::Dataset(_)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = try_load_intents("/nonexistent/intents.json").unwrap_err();
        assert!(matches!(err, ColloquyError::Io(_)));
        assert!(load_intents("/nonexistent/intents.json").is_empty());
    }
}
