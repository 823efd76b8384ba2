//! Trim filter implementation.
//!
//! Cuts every raw segment down to the span between its first and last ASCII
//! letter, then removes a trailing possessive (`'s`, `'S`, or the same with a
//! typographic apostrophe) and trims again. Segments without any letter
//! become empty and are stopped.
//!
//! # Examples
//!
//! ```
//! use spamfilter::analysis::token_filter::trim::TrimFilter;
//!
//! assert_eq!(TrimFilter::trim_word("\"Hello,\""), "Hello");
//! assert_eq!(TrimFilter::trim_word("company's"), "company");
//! assert_eq!(TrimFilter::trim_word("--42--"), "");
//! ```

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

const POSSESSIVE_SUFFIXES: &[&str] = &["'s", "'S", "\u{2019}s", "\u{2019}S"];

/// A filter that trims tokens to their alphabetic core.
#[derive(Clone, Debug, Default)]
pub struct TrimFilter;

impl TrimFilter {
    /// Create a new trim filter.
    pub fn new() -> Self {
        TrimFilter
    }

    /// Trim `word` to the span between its first and last ASCII letter.
    ///
    /// Returns an empty slice when `word` contains no ASCII letter.
    pub fn trim_ends(word: &str) -> &str {
        word.trim_matches(|c: char| !c.is_ascii_alphabetic())
    }

    /// Trim `word` and strip one trailing possessive.
    pub fn trim_word(word: &str) -> &str {
        let core = Self::trim_ends(word);
        match POSSESSIVE_SUFFIXES
            .iter()
            .find_map(|suffix| core.strip_suffix(suffix))
        {
            Some(stem) => Self::trim_ends(stem),
            None => core,
        }
    }
}

impl Filter for TrimFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    return token;
                }
                match Self::trim_word(&token.text) {
                    "" => token.with_text("").stop(),
                    trimmed => token.with_text(trimmed),
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}
