//! Label encoding between intent tags and class indices.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::error::{ColloquyError, Result};

/// Bijection between tag strings and class indices.
///
/// Classes are the sorted distinct labels, so index `i` is the `i`-th tag in
/// lexicographic order.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: AHashMap<String, usize>,
}

impl LabelEncoder {
    /// Learn the classes from a sequence of labels.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let classes: Vec<String> = labels
            .iter()
            .map(|label| label.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let index = classes
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.clone(), idx))
            .collect();

        LabelEncoder { classes, index }
    }

    /// Index of a label, if it was seen during fitting.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Encode every label, failing on the first unknown one.
    pub fn encode_all<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.encode(label).ok_or_else(|| {
                    ColloquyError::invalid_argument(format!("unknown label '{label}'"))
                })
            })
            .collect()
    }

    /// Label of a class index.
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// All classes in index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes were learned.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_sorted_and_distinct() {
        let encoder = LabelEncoder::fit(&["greeting", "bye", "greeting", "fees"]);
        assert_eq!(encoder.classes(), &["bye", "fees", "greeting"]);
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn test_encode_decode() {
        let encoder = LabelEncoder::fit(&["greeting", "bye"]);
        assert_eq!(encoder.encode("bye"), Some(0));
        assert_eq!(encoder.encode("greeting"), Some(1));
        assert_eq!(encoder.encode("weather"), None);
        assert_eq!(encoder.decode(1), Some("greeting"));
        assert_eq!(encoder.decode(2), None);
    }

    #[test]
    fn test_encode_all() {
        let encoder = LabelEncoder::fit(&["a", "b"]);
        assert_eq!(encoder.encode_all(&["b", "a", "b"]).unwrap(), vec![1, 0, 1]);
        assert!(encoder.encode_all(&["c"]).is_err());
    }

    #[test]
    fn test_empty() {
        let encoder = LabelEncoder::fit::<&str>(&[]);
        assert!(encoder.is_empty());
    }
}
