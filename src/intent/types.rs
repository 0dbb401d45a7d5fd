//! Common types for the intents dataset.

use ahash::AHashMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// A named category of user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier, also the classifier label.
    pub tag: String,
    /// Example phrasings used for training.
    pub patterns: Vec<String>,
    /// Candidate replies.
    pub responses: Vec<String>,
}

impl Intent {
    /// Create a new intent.
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        Intent {
            tag: tag.into(),
            patterns,
            responses,
        }
    }
}

/// Training sample for intent classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Pattern text.
    pub text: String,
    /// Intent tag.
    pub label: String,
}

/// Loaded intents with constant-time lookup by tag.
///
/// Tags are unique within a set. When the source repeats a tag, the later
/// intent's patterns and responses are appended to the first one.
#[derive(Debug, Clone, Default)]
pub struct IntentSet {
    intents: Vec<Intent>,
    by_tag: AHashMap<String, usize>,
}

impl IntentSet {
    /// Build a set from loaded intents, merging repeated tags.
    pub fn new(intents: Vec<Intent>) -> Self {
        let mut set = IntentSet {
            intents: Vec::with_capacity(intents.len()),
            by_tag: AHashMap::with_capacity(intents.len()),
        };

        for intent in intents {
            match set.by_tag.get(&intent.tag) {
                Some(&idx) => {
                    warn!(
                        "Duplicate intent tag '{}', merging its patterns and responses",
                        intent.tag
                    );
                    let existing = &mut set.intents[idx];
                    existing.patterns.extend(intent.patterns);
                    existing.responses.extend(intent.responses);
                }
                None => {
                    set.by_tag.insert(intent.tag.clone(), set.intents.len());
                    set.intents.push(intent);
                }
            }
        }

        set
    }

    /// Look up the intent with the given tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.by_tag.get(tag).map(|&idx| &self.intents[idx])
    }

    /// Number of distinct intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the set holds no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Iterate over intents in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    /// Tags in source order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|intent| intent.tag.as_str())
    }

    /// Total number of patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|intent| intent.patterns.len()).sum()
    }

    /// Flatten every (intent, pattern) pair into a training example.
    pub fn training_examples(&self) -> Vec<TrainingExample> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent.patterns.iter().map(|pattern| TrainingExample {
                    text: pattern.clone(),
                    label: intent.tag.clone(),
                })
            })
            .collect()
    }
}

impl From<Vec<Intent>> for IntentSet {
    fn from(intents: Vec<Intent>) -> Self {
        IntentSet::new(intents)
    }
}
