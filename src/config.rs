//! Configuration for the chatbot.
//!
//! Every field has a default, so a configuration file only needs the keys it
//! changes:
//!
//! ```json
//! {"svm": {"c": 0.5}, "min_confidence": 0.3}
//! ```
//!
//! # Example
//!
//! ```
//! use colloquy::config::ChatbotConfig;
//!
//! let config = ChatbotConfig::default().with_min_confidence(0.25);
//! assert_eq!(config.min_confidence, Some(0.25));
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ColloquyError, Result};
use crate::ml::intent_classifier::SvmConfig;

/// Chatbot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Classifier hyperparameters.
    pub svm: SvmConfig,

    /// Minimum probability the top intent needs before its response is used.
    ///
    /// `None` always answers with the best guess.
    pub min_confidence: Option<f64>,

    /// Seed for response selection; `None` uses the thread-local generator.
    pub response_seed: Option<u64>,
}

impl ChatbotConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ChatbotConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the classifier hyperparameters.
    pub fn with_svm(mut self, svm: SvmConfig) -> Self {
        self.svm = svm;
        self
    }

    /// Set the confidence threshold.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    /// Set the response selection seed.
    pub fn with_response_seed(mut self, seed: u64) -> Self {
        self.response_seed = Some(seed);
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        self.svm.validate()?;
        if let Some(threshold) = self.min_confidence
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(ColloquyError::invalid_config(format!(
                "min_confidence must be within [0, 1], got {threshold}"
            )));
        }
        Ok(())
    }
}
