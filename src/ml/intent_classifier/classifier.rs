//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::Classification;

/// Intent classifier trait.
///
/// Implementations map free text to the most probable intent tag. They are
/// immutable once built and shared read-only between conversations.
pub trait IntentClassifier: Send + Sync {
    /// Classify a message.
    ///
    /// # Returns
    /// The ranked classification, or `None` when the message contains no word
    /// tokens and there is nothing to classify.
    fn classify(&self, text: &str) -> Result<Option<Classification>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
