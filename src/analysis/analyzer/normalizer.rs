//! The text normalizer shared by training and inference.
//!
//! Lowercases the whole input and then splits it on Unicode word boundaries.
//! The vectorizer holds one normalizer and uses it both when fitting the
//! vocabulary and when transforming user messages, so the two never disagree
//! on how a contraction or a punctuated word is split.
//!
//! # Examples
//!
//! ```
//! use colloquy::analysis::analyzer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! assert_eq!(
//!     normalizer.normalize("Hi there! What's the Fee?").unwrap(),
//!     vec!["hi", "there", "what's", "the", "fee"]
//! );
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Lowercasing, word-segmenting analyzer.
#[derive(Clone)]
pub struct TextNormalizer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl TextNormalizer {
    /// Create a normalizer backed by the Unicode word tokenizer.
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(UnicodeWordTokenizer::new()))
    }

    /// Create a normalizer with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        TextNormalizer { tokenizer }
    }

    /// Get the tokenizer used by this normalizer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Lowercase and tokenize `text` into word tokens.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        self.terms(text)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for TextNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(&text.to_lowercase())
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_normalize_lowercases_and_splits() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("HELLO, World").unwrap(),
            vec!["hello", "world"]
        );
    }

    #[test]
    fn test_normalize_empty() {
        let normalizer = TextNormalizer::new();
        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("   ?! ").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = TextNormalizer::new();
        for text in [
            "Where is the CSE department?",
            "what's the admission fee",
            "Hi!! How are   you?",
            "Öffnungszeiten der Bibliothek",
        ] {
            let once = normalizer.normalize(text).unwrap();
            let twice = normalizer.normalize(&once.join(" ")).unwrap();
            assert_eq!(once, twice, "normalizing {text:?} twice changed the tokens");
        }
    }

    struct CommaTokenizer;

    impl Tokenizer for CommaTokenizer {
        fn tokenize(&self, text: &str) -> Result<TokenStream> {
            let tokens: Vec<Token> = text
                .split(',')
                .map(|s| Token::new(s.trim()))
                .collect();
            Ok(Box::new(tokens.into_iter()))
        }

        fn name(&self) -> &'static str {
            "comma"
        }
    }

    #[test]
    fn test_custom_tokenizer() {
        let normalizer = TextNormalizer::with_tokenizer(Arc::new(CommaTokenizer));
        assert_eq!(
            normalizer.normalize("New York, Paris").unwrap(),
            vec!["new york", "paris"]
        );
        assert_eq!(normalizer.tokenizer().name(), "comma");
        assert_eq!(normalizer.name(), "normalizer");
    }
}
