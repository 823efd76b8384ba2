//! Training: corpora in, estimated model out.

use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::analysis::Analyzer;
use crate::analysis::SpamAnalyzer;
use crate::bayes::config::ClassifierConfig;
use crate::bayes::estimator::{Estimator, Priors};
use crate::bayes::model::Model;
use crate::bayes::types::Label;
use crate::bayes::vocabulary::{PruneStats, VocabularyBuilder};
use crate::corpus::Corpus;
use crate::error::{Result, SpamFilterError};

/// Corpus path recorded for a corpus that was not loaded from a directory.
pub const IN_MEMORY_CORPUS_PATH: &str = "<memory>";

/// Builds models from labeled corpora.
#[derive(Debug, Clone)]
pub struct Trainer {
    analyzer: SpamAnalyzer,
    estimator: Estimator,
}

impl Trainer {
    pub fn new(analyzer: SpamAnalyzer, estimator: Estimator) -> Self {
        Trainer {
            analyzer,
            estimator,
        }
    }

    /// Build the analyzer and estimator a configuration describes.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = SpamAnalyzer::from_config(&config.analysis)?;
        let estimator = Estimator::new(config.smoothing_factor)?;
        Ok(Trainer::new(analyzer, estimator))
    }

    pub fn analyzer(&self) -> &SpamAnalyzer {
        &self.analyzer
    }

    /// Load both directories and train on them.
    pub fn train_dirs<H: AsRef<Path>, S: AsRef<Path>>(&self, ham_dir: H, spam_dir: S) -> Result<Model> {
        let ham = Corpus::load_dir(ham_dir.as_ref())?;
        let spam = Corpus::load_dir(spam_dir.as_ref())?;
        self.train(&ham, &spam)
    }

    /// Count, prune, and estimate.
    pub fn train(&self, ham: &Corpus, spam: &Corpus) -> Result<Model> {
        Ok(self.train_with_stats(ham, spam)?.0)
    }

    /// Like [`train`](Trainer::train), also returning what pruning removed.
    pub fn train_with_stats(&self, ham: &Corpus, spam: &Corpus) -> Result<(Model, PruneStats)> {
        let priors = Priors::from_counts(ham.len(), spam.len())?;

        let builder = self
            .count(ham, Label::Ham)?
            .merge(self.count(spam, Label::Spam)?);
        let (mut vocabulary, stats) = builder.build();
        self.estimator.estimate(&mut vocabulary);

        info!(
            "trained on {} ham and {} spam documents: {} words retained, {} pruned",
            ham.len(),
            spam.len(),
            vocabulary.len(),
            stats.pruned_words
        );

        let model = Model::new(
            corpus_path(ham),
            corpus_path(spam),
            priors,
            vocabulary,
        );
        Ok((model, stats))
    }

    fn count(&self, corpus: &Corpus, label: Label) -> Result<VocabularyBuilder> {
        corpus
            .documents()
            .par_iter()
            .map(|document| self.analyzer.words(document.text()))
            .try_fold(VocabularyBuilder::new, |mut builder, words| {
                builder.add_document(label, &words?);
                Ok::<_, SpamFilterError>(builder)
            })
            .try_reduce(VocabularyBuilder::new, |a, b| Ok(a.merge(b)))
    }
}

/// The directory a corpus came from, or [`IN_MEMORY_CORPUS_PATH`].
fn corpus_path(corpus: &Corpus) -> PathBuf {
    corpus
        .root()
        .map_or_else(|| PathBuf::from(IN_MEMORY_CORPUS_PATH), Path::to_path_buf)
}
