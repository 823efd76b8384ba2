//! Analyzer implementations that combine char filters, a tokenizer and
//! token filters.

mod analyzer;
mod pipeline;
mod spam;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
pub use spam::SpamAnalyzer;
