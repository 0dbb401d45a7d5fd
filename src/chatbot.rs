//! The chatbot context: trained model plus indexed intents.
//!
//! A [`Chatbot`] is built once at startup and then only read. Every call to
//! [`Chatbot::process_message`] runs normalize → transform → predict →
//! select response and always produces a reply.
//!
//! # Example
//!
//! ```
//! use colloquy::chatbot::Chatbot;
//! use colloquy::config::ChatbotConfig;
//! use colloquy::intent::parse_intents;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let intents = parse_intents(r#"{"intents": [
//!     {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!"]},
//!     {"tag": "bye", "patterns": ["goodbye", "see you"], "responses": ["Bye!"]}
//! ]}"#);
//!
//! let bot = Chatbot::train(intents, ChatbotConfig::default())?;
//! assert_eq!(bot.process_message("hi there"), "Hi!");
//! assert_eq!(bot.process_message("see you"), "Bye!");
//! # Ok(())
//! # }
//! ```

use log::{debug, error, info};
use rand::Rng;

use crate::config::ChatbotConfig;
use crate::error::{ColloquyError, Result};
use crate::intent::types::IntentSet;
use crate::ml::intent_classifier::{self, Classification, IntentClassifier};
use crate::response::{NOT_UNDERSTOOD_REPLY, select_response};

/// Immutable chatbot context shared by every conversation.
pub struct Chatbot {
    intents: IntentSet,
    classifier: Box<dyn IntentClassifier>,
    config: ChatbotConfig,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("intents", &self.intents.len())
            .field("classifier", &self.classifier.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Chatbot {
    /// Train the classifier on every pattern of `intents`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, an empty dataset, patterns without
    /// word tokens, or fewer than two distinct tags with patterns.
    pub fn train<I: Into<IntentSet>>(intents: I, config: ChatbotConfig) -> Result<Self> {
        config.validate()?;

        let intents = intents.into();
        if intents.is_empty() {
            return Err(ColloquyError::dataset("no intents to train on"));
        }

        let examples = intents.training_examples();
        info!(
            "Training on {} patterns from {} intents",
            examples.len(),
            intents.len()
        );

        let classifier = intent_classifier::new_svm_based(&examples, &config.svm)?;

        Ok(Self::with_classifier(intents, classifier, config))
    }

    /// Assemble a chatbot from an already trained classifier.
    pub fn with_classifier(
        intents: IntentSet,
        classifier: Box<dyn IntentClassifier>,
        config: ChatbotConfig,
    ) -> Self {
        Chatbot {
            intents,
            classifier,
            config,
        }
    }

    /// The indexed intents.
    pub fn intents(&self) -> &IntentSet {
        &self.intents
    }

    /// The trained classifier.
    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    /// The configuration the chatbot was built with.
    pub fn config(&self) -> &ChatbotConfig {
        &self.config
    }

    /// Classify a message without selecting a response.
    pub fn classify(&self, text: &str) -> Result<Option<Classification>> {
        self.classifier.classify(text)
    }

    /// Reply to a message, drawing the response with `rng`.
    ///
    /// Never fails: empty input, input without word tokens, low-confidence
    /// predictions (when a threshold is configured) and classifier errors all
    /// produce [`NOT_UNDERSTOOD_REPLY`].
    pub fn process_message_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        if text.trim().is_empty() {
            return NOT_UNDERSTOOD_REPLY.to_string();
        }

        let classification = match self.classify(text) {
            Ok(Some(classification)) => classification,
            Ok(None) => {
                debug!("Message {text:?} has no word tokens");
                return NOT_UNDERSTOOD_REPLY.to_string();
            }
            Err(e) => {
                error!("Failed to classify message {text:?}: {e}");
                return NOT_UNDERSTOOD_REPLY.to_string();
            }
        };

        if let Some(threshold) = self.config.min_confidence
            && classification.confidence < threshold
        {
            debug!(
                "Best intent {} ({:.3}) is below min_confidence {threshold}",
                classification.label, classification.confidence
            );
            return NOT_UNDERSTOOD_REPLY.to_string();
        }

        select_response(&classification.label, &self.intents, rng)
    }

    /// Reply to a message using the thread-local random generator.
    pub fn process_message(&self, text: &str) -> String {
        self.process_message_with_rng(text, &mut rand::rng())
    }
}
