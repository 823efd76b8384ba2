//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is the complete text processing pipeline between a raw
//! document and the words the classifier counts:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Words
//! ```
//!
//! Training and classification must run the very same analyzer; any
//! asymmetry between the two silently skews the scores.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can be shared by the
/// rayon workers that analyse a corpus.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;

    /// Analyze `text` and keep only the token texts.
    fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
