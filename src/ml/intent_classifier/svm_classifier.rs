//! Intent classifier using TF-IDF features and a one-vs-rest linear SVM.

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::error::{ColloquyError, Result};
use crate::intent::types::TrainingExample;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::label_encoder::LabelEncoder;
use crate::ml::intent_classifier::svm::{LinearSvc, SvmConfig};
use crate::ml::intent_classifier::tfidf::TfIdfVectorizer;
use crate::ml::intent_classifier::types::{Classification, LabelScore};

/// The trained model: vectorizer state, label encoder and SVM parameters.
///
/// Built once from the full training set and never mutated afterwards.
#[derive(Debug)]
pub struct SvmIntentClassifier {
    vectorizer: TfIdfVectorizer,
    labels: LabelEncoder,
    svc: LinearSvc,
}

impl SvmIntentClassifier {
    /// Fit the vectorizer and label encoder and train the SVM.
    ///
    /// # Errors
    ///
    /// Fails when there are no examples, the patterns contain no word
    /// tokens, or fewer than two distinct labels are present.
    pub fn train(
        examples: &[TrainingExample],
        analyzer: Arc<dyn Analyzer>,
        config: &SvmConfig,
    ) -> Result<Self> {
        if examples.is_empty() {
            return Err(ColloquyError::invalid_argument(
                "Training examples cannot be empty",
            ));
        }

        let documents: Vec<String> = examples.iter().map(|e| e.text.clone()).collect();
        let tags: Vec<&str> = examples.iter().map(|e| e.label.as_str()).collect();

        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        vectorizer.fit(&documents)?;

        let labels = LabelEncoder::fit(&tags);
        let targets = labels.encode_all(&tags)?;

        let vectors = documents
            .iter()
            .map(|doc| vectorizer.transform(doc))
            .collect::<Result<Vec<_>>>()?;

        let svc = LinearSvc::train(&vectors, &targets, labels.len(), config)?;

        info!(
            "Trained intent classifier on {} examples, {} labels, {} features",
            examples.len(),
            labels.len(),
            vectorizer.vocabulary_size()
        );

        Ok(SvmIntentClassifier {
            vectorizer,
            labels,
            svc,
        })
    }

    /// Tags the classifier can predict, in class-index order.
    pub fn labels(&self) -> &[String] {
        self.labels.classes()
    }
}

impl IntentClassifier for SvmIntentClassifier {
    fn classify(&self, text: &str) -> Result<Option<Classification>> {
        let terms = self.vectorizer.analyzer().terms(text)?;
        if terms.is_empty() {
            return Ok(None);
        }

        let features = self.vectorizer.transform_terms(&terms)?;
        let probabilities = self.svc.predict_proba(&features)?;

        let scores = probabilities
            .into_iter()
            .enumerate()
            .map(|(idx, probability)| {
                let label = self.labels.decode(idx).ok_or_else(|| {
                    ColloquyError::model(format!("class index {idx} has no label"))
                })?;
                Ok(LabelScore {
                    label: label.to_string(),
                    probability,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let classification = Classification::from_scores(scores);
        if let Some(c) = &classification {
            debug!("Classified intent: {} ({:.3})", c.label, c.confidence);
        }
        Ok(classification)
    }

    fn name(&self) -> &str {
        "svm"
    }
}
