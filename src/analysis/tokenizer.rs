//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step after char filtering: they split the text
//! into raw segments. Everything that normalizes or rejects a segment is a
//! token filter.
//!
//! # Examples
//!
//! ```
//! use spamfilter::analysis::tokenizer::Tokenizer;
//! use spamfilter::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello  world\n").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one analyzer can serve parallel
/// training and classification.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
