//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by the tokenizer and rewrite,
//! stop, or drop tokens. The spam analyzer chains them as:
//!
//! ```text
//! Tokenizer → Trim → Lowercase → Accept → Stop → RemoveEmpty
//! ```
//!
//! # Available Filters
//!
//! - [`trim::TrimFilter`] - Trims non-alphabetic ends and trailing possessives
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`accept::AcceptFilter`] - Stops tokens outside the vocabulary word shape
//! - [`stop::StopFilter`] - Removes stop words
//! - [`remove_empty::RemoveEmptyFilter`] - Drops empty and stopped tokens
//!
//! # Examples
//!
//! ```
//! use spamfilter::analysis::token::Token;
//! use spamfilter::analysis::token_filter::Filter;
//! use spamfilter::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello"), Token::new("WORLD")];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod accept;
pub mod lowercase;
pub mod remove_empty;
pub mod stop;
pub mod trim;

pub use accept::AcceptFilter;
pub use lowercase::LowercaseFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stop::StopFilter;
pub use trim::TrimFilter;
