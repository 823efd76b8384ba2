//! The trained model.

use std::path::{Path, PathBuf};

use crate::bayes::estimator::Priors;
use crate::bayes::types::Label;
use crate::bayes::vocabulary::{QuantifiedWord, Vocabulary};

/// Everything classification needs from a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    ham_corpus_path: PathBuf,
    spam_corpus_path: PathBuf,
    priors: Priors,
    vocabulary: Vocabulary,
}

impl Model {
    pub fn new<H: Into<PathBuf>, S: Into<PathBuf>>(
        ham_corpus_path: H,
        spam_corpus_path: S,
        priors: Priors,
        vocabulary: Vocabulary,
    ) -> Self {
        Model {
            ham_corpus_path: ham_corpus_path.into(),
            spam_corpus_path: spam_corpus_path.into(),
            priors,
            vocabulary,
        }
    }

    /// Directory the ham documents were read from.
    pub fn ham_corpus_path(&self) -> &Path {
        &self.ham_corpus_path
    }

    /// Directory the spam documents were read from.
    pub fn spam_corpus_path(&self) -> &Path {
        &self.spam_corpus_path
    }

    pub fn priors(&self) -> &Priors {
        &self.priors
    }

    pub fn ham_prior(&self) -> f64 {
        self.priors.ham()
    }

    pub fn spam_prior(&self) -> f64 {
        self.priors.spam()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn word(&self, word: &str) -> Option<&QuantifiedWord> {
        self.vocabulary.get(word)
    }

    /// Words leaning most towards `label`, by the log ratio of their
    /// conditional probabilities. Unestimated words are skipped.
    pub fn most_indicative(&self, label: Label, n: usize) -> Vec<(&QuantifiedWord, f64)> {
        let mut ranked: Vec<(&QuantifiedWord, f64)> = self
            .vocabulary
            .iter()
            .filter_map(|word| {
                let ham = word.ham_probability()?;
                let spam = word.spam_probability()?;
                let ratio = match label {
                    Label::Ham => ham.log10() - spam.log10(),
                    Label::Spam => spam.log10() - ham.log10(),
                };
                Some((word, ratio))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.word().cmp(b.0.word())));
        ranked.truncate(n);
        ranked
    }
}
