//! Helper functions for creating intent classifiers.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::TextNormalizer;
use crate::error::Result;
use crate::intent::types::TrainingExample;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::svm::SvmConfig;
use crate::ml::intent_classifier::svm_classifier::SvmIntentClassifier;

/// Train an SVM intent classifier with the default text normalizer.
pub fn new_svm_based(
    examples: &[TrainingExample],
    config: &SvmConfig,
) -> Result<Box<dyn IntentClassifier>> {
    new_svm_based_with_analyzer(examples, Arc::new(TextNormalizer::new()), config)
}

/// Train an SVM intent classifier with a custom analyzer.
pub fn new_svm_based_with_analyzer(
    examples: &[TrainingExample],
    analyzer: Arc<dyn Analyzer>,
    config: &SvmConfig,
) -> Result<Box<dyn IntentClassifier>> {
    Ok(Box::new(SvmIntentClassifier::train(examples, analyzer, config)?))
}
