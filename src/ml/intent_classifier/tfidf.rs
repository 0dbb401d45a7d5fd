//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::error::{ColloquyError, Result};

/// TF-IDF vectorizer for text feature extraction.
///
/// Feature indices follow the sorted order of the vocabulary, so fitting the
/// same corpus always yields the same layout. Weights are raw term counts
/// times the smoothed IDF `ln((1 + n) / (1 + df)) + 1`, and every vector is
/// L2 normalized.
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// A vectorizer is fitted exactly once; a second call is rejected.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.is_fitted() {
            return Err(ColloquyError::model("TF-IDF vectorizer is already fitted"));
        }
        if documents.is_empty() {
            return Err(ColloquyError::invalid_argument(
                "cannot fit TF-IDF vectorizer on an empty corpus",
            ));
        }

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for doc in documents {
            let unique_tokens: HashSet<String> = self.analyzer.terms(doc)?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ColloquyError::model(
                "empty vocabulary; training documents contain no word tokens",
            ));
        }

        let sorted: BTreeSet<&String> = document_frequency.keys().collect();
        let vocabulary: AHashMap<String, usize> = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();

        let n = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (word, &idx) in &vocabulary {
            let df = document_frequency[word] as f64;
            idf[idx] = ((n + 1.0) / (df + 1.0)).ln() + 1.0;
        }

        self.n_documents = documents.len();
        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Whether [`fit`](Self::fit) has completed.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let terms = self.analyzer.terms(document)?;
        self.transform_terms(&terms)
    }

    /// Transform already-analyzed terms into a TF-IDF feature vector.
    ///
    /// Terms outside the fitted vocabulary contribute nothing; if none are
    /// known the result is the zero vector.
    pub fn transform_terms(&self, terms: &[String]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(ColloquyError::model(
                "TF-IDF vectorizer must be fitted before transform",
            ));
        }

        let mut features = vec![0.0; self.vocabulary.len()];
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                features[idx] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    /// The analyzer shared by fitting and transforming.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Feature index of a term, if it is in the vocabulary.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.feature_index(term).map(|idx| self.idf[idx])
    }
}
