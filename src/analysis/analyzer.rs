//! Analyzers combine normalization and tokenization into one pipeline.

pub mod analyzer;
pub mod normalizer;

pub use analyzer::Analyzer;
pub use normalizer::TextNormalizer;
