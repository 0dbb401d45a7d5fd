//! # Colloquy
//!
//! An intent-classification chatbot: a labeled intents dataset trains a
//! TF-IDF + linear SVM classifier once, and each incoming message is
//! answered with one of the canned responses of its predicted intent.
//!
//! ## Features
//!
//! - Unicode-aware text normalization
//! - TF-IDF features with smoothed IDF
//! - One-vs-rest linear SVM with Platt-calibrated probabilities
//! - Soft-failing dataset loaders
//! - Seedable response selection

pub mod analysis;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod error;
pub mod intent;
pub mod ml;
pub mod response;

pub mod prelude {
    pub use crate::chatbot::Chatbot;
    pub use crate::config::ChatbotConfig;
    pub use crate::error::{ColloquyError, Result};
    pub use crate::intent::{Intent, IntentSet, load_intents, parse_intents};
    pub use crate::ml::intent_classifier::{Classification, IntentClassifier, SvmConfig};
    pub use crate::response::{NO_RESPONSE_REPLY, NOT_UNDERSTOOD_REPLY};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
