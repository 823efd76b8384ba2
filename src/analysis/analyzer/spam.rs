//! Analyzer used for both training and classification.
//!
//! Built from an [`AnalysisConfig`], it strings together:
//!
//! ```text
//! MarkupStrip? → Whitespace → Trim → Lowercase? → Accept → Stop? → RemoveEmpty
//! ```
//!
//! Possessive stripping and the acceptance predicate live here and nowhere
//! else, so a corpus document and a document being classified always yield
//! words under identical rules.

use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::markup::MarkupStripCharFilter;
use crate::analysis::config::AnalysisConfig;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{
    AcceptFilter, LowercaseFilter, RemoveEmptyFilter, StopFilter, TrimFilter,
};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// The ham/spam document analyzer.
#[derive(Clone, Debug)]
pub struct SpamAnalyzer {
    pipeline: PipelineAnalyzer,
}

impl SpamAnalyzer {
    /// Build the analyzer, loading the stopwords file if one is configured.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let stop_filter = if !config.use_stopwords {
            None
        } else if let Some(path) = &config.stopwords_path {
            Some(StopFilter::from_file(path, config.case_folding)?)
        } else {
            Some(StopFilter::new())
        };

        Ok(Self::with_stop_filter(config, stop_filter))
    }

    /// Build the analyzer with an explicit stop filter (or none).
    pub fn with_stop_filter(config: &AnalysisConfig, stop_filter: Option<StopFilter>) -> Self {
        let mut pipeline = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
        if config.strip_markup {
            pipeline = pipeline.add_char_filter(Arc::new(MarkupStripCharFilter::new()));
        }
        pipeline = pipeline.add_filter(Arc::new(TrimFilter::new()));
        if config.case_folding {
            pipeline = pipeline.add_filter(Arc::new(LowercaseFilter::new()));
        }
        pipeline = pipeline.add_filter(Arc::new(AcceptFilter::new(
            config.min_word_length,
            config.max_word_length,
        )));

        let stop_words = stop_filter.as_ref().map_or(0, |f| f.len());
        if let Some(stop_filter) = stop_filter {
            pipeline = pipeline.add_filter(Arc::new(stop_filter));
        }
        let pipeline = pipeline
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("spam");

        debug!(
            "built analyzer: strip_markup={} case_folding={} lengths={}..={} stop_words={}",
            config.strip_markup,
            config.case_folding,
            config.min_word_length,
            config.max_word_length,
            stop_words
        );

        SpamAnalyzer { pipeline }
    }
}

impl Analyzer for SpamAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &'static str {
        "spam"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SpamAnalyzer {
        SpamAnalyzer::from_config(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_default_pipeline() {
        let words = analyzer()
            .words("<html>Dear FRIEND, you've WON $1,000,000!!! Claim your prize's value.</html>")
            .unwrap();
        assert_eq!(words, vec!["dear", "friend", "claim", "your", "prize", "value"]);
    }

    #[test]
    fn test_acceptance_drops_short_mixed_and_repeated() {
        let words = analyzer().words("The win2day offer, aaaa!").unwrap();
        assert_eq!(words, vec!["offer"]);
    }

    #[test]
    fn test_duplicates_and_order_are_preserved() {
        let words = analyzer().words("loan offer loan loan").unwrap();
        assert_eq!(words, vec!["loan", "offer", "loan", "loan"]);
    }

    #[test]
    fn test_default_stop_words_apply() {
        let words = analyzer().words("these words they will keep").unwrap();
        assert_eq!(words, vec!["words", "keep"]);
    }

    #[test]
    fn test_stopwords_disabled() {
        let config = AnalysisConfig {
            use_stopwords: false,
            ..Default::default()
        };
        let analyzer = SpamAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.words("these words").unwrap(), vec!["these", "words"]);
    }

    #[test]
    fn test_without_case_folding() {
        let config = AnalysisConfig {
            case_folding: false,
            ..Default::default()
        };
        let analyzer = SpamAnalyzer::with_stop_filter(&config, None);
        assert_eq!(analyzer.words("Money money").unwrap(), vec!["Money", "money"]);
    }

    #[test]
    fn test_markup_kept_when_stripping_disabled() {
        let config = AnalysisConfig {
            strip_markup: false,
            ..Default::default()
        };
        let analyzer = SpamAnalyzer::with_stop_filter(&config, None);
        // "<b>cheap</b>" trims to "b>cheap</b", which has inner punctuation.
        assert!(analyzer.words("<b>cheap</b>").unwrap().is_empty());

        let analyzer = SpamAnalyzer::with_stop_filter(&AnalysisConfig::default(), None);
        assert_eq!(analyzer.words("<b>cheap</b>").unwrap(), vec!["cheap"]);
    }

    #[test]
    fn test_accepted_tokens_have_word_shape() {
        let text = "R3placement  ---  e-mail!! (costs) $$$ 12345 don't x-ray's ZZZZ";
        for word in analyzer().words(text).unwrap() {
            assert!(word.chars().all(|c| c.is_ascii_alphabetic() || c == '-'));
            assert!(word.starts_with(|c: char| c.is_ascii_alphabetic()));
            assert!(word.ends_with(|c: char| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig {
            min_word_length: 9,
            max_word_length: 3,
            ..Default::default()
        };
        assert!(SpamAnalyzer::from_config(&config).is_err());
    }
}
