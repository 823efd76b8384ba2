//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw document text before it reaches the
//! tokenizer.
//!
//! # Available Filters
//!
//! - [`markup::MarkupStripCharFilter`] - Removes `<...>` tags (HTML/XML markup)
//!
//! # Examples
//!
//! ```
//! use spamfilter::analysis::char_filter::CharFilter;
//! use spamfilter::analysis::char_filter::markup::MarkupStripCharFilter;
//!
//! let filter = MarkupStripCharFilter::new();
//! assert_eq!(filter.filter("<b>Cheap</b> pills"), "Cheap pills");
//! ```

/// Trait for character filters that transform text before tokenization.
///
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod markup;
