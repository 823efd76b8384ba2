//! Text analysis module for spamfilter.
//!
//! This module turns raw documents into the words the classifier counts:
//! markup stripping, whitespace tokenization, trimming, case folding, the
//! vocabulary acceptance predicate and stop word removal.

pub mod analyzer;
pub mod char_filter;
pub mod config;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PipelineAnalyzer, SpamAnalyzer};
pub use config::AnalysisConfig;
pub use token::{Token, TokenStream};
