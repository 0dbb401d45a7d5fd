//! Text analysis for Colloquy.
//!
//! This module turns raw user text into the word tokens the feature encoder
//! works on. A [`tokenizer::Tokenizer`] splits text into tokens, and an
//! [`analyzer::Analyzer`] runs the complete pipeline. The
//! [`analyzer::normalizer::TextNormalizer`] is the analyzer shared by training
//! and inference so both sides see identical tokens.

pub mod analyzer;
pub mod token;
pub mod tokenizer;
