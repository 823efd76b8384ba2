//! Naive Bayes ham/spam classification.
//!
//! # Architecture
//!
//! - `VocabularyBuilder`: counts analyzed words per class and prunes rare ones
//! - `Estimator` / `Priors`: Laplace-smoothed conditionals and class priors
//! - `Trainer`: turns a ham and a spam corpus into a `Model`
//! - `Classifier` trait and `NaiveBayesClassifier`: log10 scoring of documents
//! - `store`: the plain-text model file format
//! - `Evaluation`: accuracy and confusion matrix on labeled test documents
//!
//! # Example
//!
//! ```rust,no_run
//! use spamfilter::bayes::{ClassifierConfig, NaiveBayesClassifier, Trainer};
//!
//! # fn main() -> spamfilter::error::Result<()> {
//! let config = ClassifierConfig::default();
//! let model = Trainer::from_config(&config)?.train_dirs("data/ham", "data/spam")?;
//!
//! let classifier = NaiveBayesClassifier::from_config(model, &config.analysis)?;
//! let result = classifier.classify_text("message", "Claim your free prize today")?;
//! println!("{}", result.label);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod config;
mod estimator;
mod evaluation;
mod model;
pub mod store;
mod trainer;
mod types;
mod vocabulary;

// Public exports
pub use classifier::{Classifier, NaiveBayesClassifier, score_words};
pub use config::{ClassifierConfig, DEFAULT_SMOOTHING_FACTOR};
pub use estimator::{Estimator, Priors};
pub use evaluation::{ConfusionMatrix, DocumentOutcome, Evaluation};
pub use model::Model;
pub use store::{export_model, import_model};
pub use trainer::{IN_MEMORY_CORPUS_PATH, Trainer};
pub use types::{ClassificationResult, Label};
pub use vocabulary::{MIN_RETAINED_FREQUENCY, PruneStats, QuantifiedWord, Vocabulary, VocabularyBuilder};
