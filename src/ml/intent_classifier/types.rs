//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// Probability assigned to one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Intent tag.
    pub label: String,
    /// Calibrated probability.
    pub probability: f64,
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Most probable intent tag.
    pub label: String,
    /// Probability of `label`.
    pub confidence: f64,
    /// Every label, most probable first.
    pub scores: Vec<LabelScore>,
}

impl Classification {
    /// Build a classification from per-label probabilities.
    ///
    /// Returns `None` when `scores` is empty.
    pub fn from_scores(mut scores: Vec<LabelScore>) -> Option<Self> {
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        let top = scores.first()?;
        Some(Classification {
            label: top.label.clone(),
            confidence: top.probability,
            scores,
        })
    }

    /// The `n` most probable labels.
    pub fn top(&self, n: usize) -> &[LabelScore] {
        &self.scores[..n.min(self.scores.len())]
    }
}
