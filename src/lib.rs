//! # spamfilter
//!
//! A binary Naive Bayes ham/spam document classifier.
//!
//! ## Features
//!
//! - Markup-aware text analysis pipeline
//! - Rare word pruning and Laplace smoothing
//! - log10 scoring with ties resolved as ham
//! - Plain-text model files
//! - Parallel training and batch classification
//!
//! ## Example
//!
//! ```rust,no_run
//! use spamfilter::prelude::*;
//!
//! # fn main() -> spamfilter::Result<()> {
//! let config = ClassifierConfig::default();
//! let model = spamfilter::train("data/ham", "data/spam", &config)?;
//! spamfilter::export_model(&model, "model.txt")?;
//!
//! let model = spamfilter::import_model("model.txt")?;
//! let document = Document::from_text("offer", "Cheap loans, limited offer!");
//! let result = spamfilter::classify(&document, &model, &config)?;
//! println!("{} is {}", result.document_name, result.label);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod analysis;
pub mod bayes;
pub mod cli;
pub mod corpus;
pub mod error;

pub use bayes::{export_model, import_model};
pub use error::{Result, SpamFilterError};

use analysis::{Analyzer, SpamAnalyzer};
use bayes::{ClassificationResult, ClassifierConfig, Model, Trainer};
use corpus::Document;

pub mod prelude {
    pub use crate::analysis::{AnalysisConfig, Analyzer, SpamAnalyzer};
    pub use crate::bayes::{
        ClassificationResult, Classifier, ClassifierConfig, Evaluation, Label, Model,
        NaiveBayesClassifier, Trainer,
    };
    pub use crate::corpus::{Corpus, Document};
    pub use crate::error::{Result, SpamFilterError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Train a model on every file directly inside `ham_dir` and `spam_dir`.
pub fn train<H: AsRef<Path>, S: AsRef<Path>>(
    ham_dir: H,
    spam_dir: S,
    config: &ClassifierConfig,
) -> Result<Model> {
    Trainer::from_config(config)?.train_dirs(ham_dir, spam_dir)
}

/// Classify one document against `model`.
///
/// `config` must match the configuration the model was trained with. Builds
/// the analyzer on every call; use [`bayes::NaiveBayesClassifier`] for many
/// documents.
pub fn classify(
    document: &Document,
    model: &Model,
    config: &ClassifierConfig,
) -> Result<ClassificationResult> {
    let analyzer = SpamAnalyzer::from_config(&config.analysis)?;
    let words = analyzer.words(document.text())?;
    bayes::score_words(model, document.name(), &words)
}
