//! Intent classifier using TF-IDF features and a linear SVM.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: Common interface for all classifiers
//! - `SvmIntentClassifier`: the trained model (vectorizer, label encoder, SVM)
//! - `TfIdfVectorizer`: Feature extraction using TF-IDF
//! - `LabelEncoder`: Bijection between tags and class indices
//! - `LinearSvc`: One-vs-rest soft-margin linear SVM with Platt calibration
//!
//! # Example
//!
//! ```rust
//! use colloquy::intent::TrainingExample;
//! use colloquy::ml::intent_classifier::{self, SvmConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let examples = vec![
//!     TrainingExample { text: "hello".to_string(), label: "greeting".to_string() },
//!     TrainingExample { text: "hi there".to_string(), label: "greeting".to_string() },
//!     TrainingExample { text: "goodbye".to_string(), label: "bye".to_string() },
//!     TrainingExample { text: "see you".to_string(), label: "bye".to_string() },
//! ];
//!
//! let classifier = intent_classifier::new_svm_based(&examples, &SvmConfig::default())?;
//! let result = classifier.classify("hello")?.expect("known tokens");
//! assert_eq!(result.label, "greeting");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod factory;
mod label_encoder;
mod platt;
mod svm;
mod svm_classifier;
mod tfidf;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use factory::{new_svm_based, new_svm_based_with_analyzer};
pub use label_encoder::LabelEncoder;
pub use platt::PlattScaler;
pub use svm::{LinearSvc, SvmConfig};
pub use svm_classifier::SvmIntentClassifier;
pub use tfidf::TfIdfVectorizer;
pub use types::{Classification, LabelScore};
