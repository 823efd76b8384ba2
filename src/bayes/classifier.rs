//! Naive Bayes document classification.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::{AnalysisConfig, Analyzer, SpamAnalyzer};
use crate::bayes::model::Model;
use crate::bayes::types::{ClassificationResult, Label};
use crate::corpus::{Document, expand_inputs};
use crate::error::{Result, SpamFilterError};

/// Document classifier trait.
///
/// Implementations decide whether a document is ham or spam.
pub trait Classifier: Send + Sync {
    /// Classify one document.
    fn classify(&self, document: &Document) -> Result<ClassificationResult>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Multinomial Naive Bayes over a trained [`Model`].
///
/// Scores are `log10(prior) + Σ log10(P(word|class))` over the document's
/// words that are in the vocabulary, duplicates counted. Unknown words are
/// ignored.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    model: Arc<Model>,
    analyzer: SpamAnalyzer,
}

impl NaiveBayesClassifier {
    /// `analyzer` must be configured the same way it was for training.
    pub fn new(model: Arc<Model>, analyzer: SpamAnalyzer) -> Self {
        NaiveBayesClassifier { model, analyzer }
    }

    /// Build the analyzer from `config` and wrap `model`.
    pub fn from_config(model: Model, config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(model), SpamAnalyzer::from_config(config)?))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn analyzer(&self) -> &SpamAnalyzer {
        &self.analyzer
    }

    /// Score already analyzed words.
    pub fn score_words<S: AsRef<str>>(&self, name: &str, words: &[S]) -> Result<ClassificationResult> {
        score_words(&self.model, name, words)
    }

    /// Classify in-memory text under `name`.
    pub fn classify_text(&self, name: &str, text: &str) -> Result<ClassificationResult> {
        let words = self.analyzer.words(text)?;
        self.score_words(name, &words)
    }

    /// Read and classify one file.
    pub fn classify_path<P: AsRef<Path>>(&self, path: P) -> Result<ClassificationResult> {
        let document = Document::from_path(path)?;
        self.classify(&document)
    }

    /// Classify many documents in parallel; results keep the input order.
    pub fn classify_batch(&self, documents: &[Document]) -> Result<Vec<ClassificationResult>> {
        let results = documents
            .par_iter()
            .map(|document| self.classify(document))
            .collect::<Result<Vec<_>>>()?;
        log_summary(&results);
        Ok(results)
    }

    /// Classify files in parallel; directories expand to the files directly
    /// inside them. Results keep the input order.
    pub fn classify_paths<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<ClassificationResult>> {
        let paths = expand_inputs(inputs)?;
        let results = paths
            .par_iter()
            .map(|path| self.classify_path(path))
            .collect::<Result<Vec<_>>>()?;
        log_summary(&results);
        Ok(results)
    }
}

impl Classifier for NaiveBayesClassifier {
    fn classify(&self, document: &Document) -> Result<ClassificationResult> {
        self.classify_text(document.name(), document.text())
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

/// Score analyzed words against `model`.
///
/// Words missing from the vocabulary contribute nothing; a vocabulary word
/// without an estimated probability is an error.
pub fn score_words<S: AsRef<str>>(model: &Model, name: &str, words: &[S]) -> Result<ClassificationResult> {
    let vocabulary = model.vocabulary();
    let mut ham_score = model.ham_prior().log10();
    let mut spam_score = model.spam_prior().log10();
    let mut known = 0usize;

    for word in words {
        let Some(entry) = vocabulary.get(word.as_ref()) else {
            continue;
        };
        ham_score += probability(entry.probability(Label::Ham), entry.word(), Label::Ham)?.log10();
        spam_score += probability(entry.probability(Label::Spam), entry.word(), Label::Spam)?.log10();
        known += 1;
    }

    debug!(
        "{}: {} of {} words known, ham={} spam={}",
        name,
        known,
        words.len(),
        ham_score,
        spam_score
    );
    Ok(ClassificationResult::new(name, ham_score, spam_score))
}

fn probability(value: Option<f64>, word: &str, label: Label) -> Result<f64> {
    value.ok_or_else(|| {
        SpamFilterError::invalid_operation(format!("{label} probability of '{word}' is not set"))
    })
}

fn log_summary(results: &[ClassificationResult]) {
    let spam = results.iter().filter(|r| r.is_spam()).count();
    info!(
        "classified {} documents: {} ham, {} spam",
        results.len(),
        results.len() - spam,
        spam
    );
}
