//! Machine learning for intent classification.
//!
//! The [`intent_classifier`] module holds the whole trained pipeline: TF-IDF
//! feature extraction, label encoding, the one-vs-rest linear SVM and its
//! probability calibration.

pub mod intent_classifier;
