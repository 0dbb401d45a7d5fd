//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is the complete text processing pipeline, from raw text to
//! the tokens the feature encoder counts:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → TfIdfVectorizer
//!             ↓
//!         Normalization
//!             ↓
//!         Tokenizer
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so the trained model that owns an
/// analyzer can be shared read-only across threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Analyze the given text and collect the token texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
