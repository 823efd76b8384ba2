//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! # Architecture
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: rewrite the raw text (markup stripping)
//! 2. Tokenizer: splits text into tokens
//! 3. Token Filters: applied sequentially in the order they were added
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use spamfilter::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use spamfilter::analysis::token_filter::{LowercaseFilter, StopFilter, TrimFilter};
//! use spamfilter::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(TrimFilter::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])))
//!     .with_name("my_custom_analyzer");
//!
//! let words = analyzer.words("Hello, THE world AND test!").unwrap();
//! assert_eq!(words, vec!["hello", "world", "test"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let filtered_text = self
            .char_filters
            .iter()
            .fold(text.to_string(), |current, char_filter| {
                char_filter.filter(&current)
            });

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::markup::MarkupStripCharFilter;
    use crate::analysis::token_filter::{LowercaseFilter, TrimFilter};
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    fn markup_pipeline() -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(MarkupStripCharFilter::new()))
            .add_filter(Arc::new(TrimFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
    }

    #[test]
    fn test_pipeline_runs_filters_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(TrimFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));

        let words = analyzer.words("(FREE) Money!").unwrap();
        assert_eq!(words, vec!["free", "money"]);
    }

    #[test]
    fn test_char_filters_run_before_tokenizer() {
        // Without markup stripping "</p>" would glue the two words together.
        let words = markup_pipeline().words("<p>Cheap</p><b>pills</b>").unwrap();
        assert_eq!(words, vec!["cheappills"]);

        let words = markup_pipeline().words("<p>Cheap</p> <b>Pills</b>").unwrap();
        assert_eq!(words, vec!["cheap", "pills"]);
    }

    #[test]
    fn test_debug_lists_stages() {
        let debug = format!("{:?}", markup_pipeline().with_name("spam"));
        assert!(debug.contains("markup_strip"));
        assert!(debug.contains("lowercase"));
        assert!(debug.contains("spam"));
    }
}
