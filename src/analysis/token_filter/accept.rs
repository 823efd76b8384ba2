//! Acceptance filter implementation.
//!
//! Stops every token that does not have the shape of a vocabulary word:
//! its length must lie within the configured bounds, it may contain only
//! ASCII letters and hyphens, and it must not be one character repeated
//! (`"aaaa"`, `"----"`).

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that stops tokens failing the vocabulary word predicate.
#[derive(Clone, Debug)]
pub struct AcceptFilter {
    min_length: usize,
    max_length: usize,
}

impl AcceptFilter {
    /// Create a new acceptance filter for word lengths in `[min_length, max_length]`.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        AcceptFilter {
            min_length,
            max_length,
        }
    }

    /// Check whether `word` is acceptable as a vocabulary word.
    ///
    /// # Examples
    ///
    /// ```
    /// use spamfilter::analysis::token_filter::accept::AcceptFilter;
    ///
    /// let filter = AcceptFilter::new(4, 22);
    /// assert!(filter.is_acceptable("e-mail"));
    /// assert!(!filter.is_acceptable("win2day"));
    /// assert!(!filter.is_acceptable("zzzz"));
    /// assert!(!filter.is_acceptable("buy"));
    /// ```
    pub fn is_acceptable(&self, word: &str) -> bool {
        let length = word.chars().count();
        (self.min_length..=self.max_length).contains(&length)
            && has_word_characters_only(word)
            && !is_character_repetition(word)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Every character is an ASCII letter or a hyphen.
fn has_word_characters_only(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

/// Every character equals the first one.
fn is_character_repetition(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

impl Filter for AcceptFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() || self.is_acceptable(&token.text) {
                    token
                } else {
                    token.stop()
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "accept"
    }
}
