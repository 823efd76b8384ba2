//! Per-word statistics and the pruned vocabulary.

use ahash::AHashMap;
use log::debug;
use serde::Serialize;

use crate::bayes::types::Label;
use crate::error::{Result, SpamFilterError};

/// A word must reach this frequency in at least one class to be retained.
pub const MIN_RETAINED_FREQUENCY: u64 = 2;

/// Frequencies and estimated conditional probabilities of one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantifiedWord {
    word: String,
    ham_frequency: u64,
    spam_frequency: u64,
    /// None until estimated.
    ham_probability: Option<f64>,
    spam_probability: Option<f64>,
}

impl QuantifiedWord {
    /// A word seen zero times in either class.
    pub fn new<S: Into<String>>(word: S) -> Self {
        Self::with_frequencies(word, 0, 0)
    }

    pub fn with_frequencies<S: Into<String>>(word: S, ham_frequency: u64, spam_frequency: u64) -> Self {
        QuantifiedWord {
            word: word.into(),
            ham_frequency,
            spam_frequency,
            ham_probability: None,
            spam_probability: None,
        }
    }

    /// Rebuild a word with all of its statistics, as read back from a model file.
    pub fn from_parts<S: Into<String>>(
        word: S,
        ham_frequency: u64,
        ham_probability: Option<f64>,
        spam_frequency: u64,
        spam_probability: Option<f64>,
    ) -> Self {
        QuantifiedWord {
            word: word.into(),
            ham_frequency,
            spam_frequency,
            ham_probability,
            spam_probability,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn ham_frequency(&self) -> u64 {
        self.ham_frequency
    }

    pub fn spam_frequency(&self) -> u64 {
        self.spam_frequency
    }

    pub fn frequency(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.ham_frequency,
            Label::Spam => self.spam_frequency,
        }
    }

    pub fn ham_probability(&self) -> Option<f64> {
        self.ham_probability
    }

    pub fn spam_probability(&self) -> Option<f64> {
        self.spam_probability
    }

    /// P(word | label), if estimated.
    pub fn probability(&self, label: Label) -> Option<f64> {
        match label {
            Label::Ham => self.ham_probability,
            Label::Spam => self.spam_probability,
        }
    }

    /// Both conditional probabilities are set.
    pub fn is_estimated(&self) -> bool {
        self.ham_probability.is_some() && self.spam_probability.is_some()
    }

    /// Retained iff the word was seen at least twice in at least one class.
    pub fn is_retained(&self) -> bool {
        self.ham_frequency >= MIN_RETAINED_FREQUENCY
            || self.spam_frequency >= MIN_RETAINED_FREQUENCY
    }

    pub(crate) fn add_occurrences(&mut self, label: Label, count: u64) {
        match label {
            Label::Ham => self.ham_frequency += count,
            Label::Spam => self.spam_frequency += count,
        }
    }

    pub(crate) fn set_probabilities(&mut self, ham: f64, spam: f64) {
        self.ham_probability = Some(ham);
        self.spam_probability = Some(spam);
    }
}

/// Counts dropped and kept by pruning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PruneStats {
    /// Distinct words before pruning.
    pub distinct_words: usize,
    /// Distinct words removed.
    pub pruned_words: usize,
    /// Ham occurrences before pruning.
    pub raw_ham_word_count: u64,
    /// Spam occurrences before pruning.
    pub raw_spam_word_count: u64,
}

impl PruneStats {
    pub fn retained_words(&self) -> usize {
        self.distinct_words - self.pruned_words
    }
}

/// The retained words with their class totals.
///
/// The class totals always equal the sum of the retained words' frequencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    words: AHashMap<String, QuantifiedWord>,
    ham_word_count: u64,
    spam_word_count: u64,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from words, recomputing the class totals.
    ///
    /// A later word replaces an earlier one with the same text.
    pub fn from_words<I: IntoIterator<Item = QuantifiedWord>>(words: I) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        for word in words {
            vocabulary.insert(word)?;
        }
        Ok(vocabulary)
    }

    /// Insert a word, keeping the class totals consistent.
    ///
    /// Fails without changing the vocabulary if a class total would overflow.
    pub fn insert(&mut self, word: QuantifiedWord) -> Result<Option<QuantifiedWord>> {
        let (old_ham, old_spam) = self
            .words
            .get(&word.word)
            .map_or((0, 0), |old| (old.ham_frequency, old.spam_frequency));

        let ham = (self.ham_word_count - old_ham).checked_add(word.ham_frequency);
        let spam = (self.spam_word_count - old_spam).checked_add(word.spam_frequency);
        let (Some(ham), Some(spam)) = (ham, spam) else {
            return Err(SpamFilterError::invalid_operation(format!(
                "frequencies of '{}' overflow the class totals",
                word.word
            )));
        };

        self.ham_word_count = ham;
        self.spam_word_count = spam;
        Ok(self.words.insert(word.word.clone(), word))
    }

    pub fn get(&self, word: &str) -> Option<&QuantifiedWord> {
        self.words.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Number of distinct retained words (|V|).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn ham_word_count(&self) -> u64 {
        self.ham_word_count
    }

    pub fn spam_word_count(&self) -> u64 {
        self.spam_word_count
    }

    /// Total occurrences of retained words in documents of `label`.
    pub fn word_count(&self, label: Label) -> u64 {
        match label {
            Label::Ham => self.ham_word_count,
            Label::Spam => self.spam_word_count,
        }
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &QuantifiedWord> {
        self.words.values()
    }

    /// All words ordered by their text.
    pub fn sorted(&self) -> Vec<&QuantifiedWord> {
        let mut words: Vec<&QuantifiedWord> = self.words.values().collect();
        words.sort_by(|a, b| a.word.cmp(&b.word));
        words
    }

    /// Every word carries both probabilities.
    pub fn is_estimated(&self) -> bool {
        self.words.values().all(QuantifiedWord::is_estimated)
    }

    pub(crate) fn words_mut(&mut self) -> impl Iterator<Item = &mut QuantifiedWord> {
        self.words.values_mut()
    }
}

/// Accumulates word counts from analyzed documents.
///
/// Builders fold independently and [`merge`](VocabularyBuilder::merge), so
/// the per-document work can run on any number of threads.
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    words: AHashMap<String, QuantifiedWord>,
    ham_documents: usize,
    spam_documents: usize,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every word of one document, duplicates included.
    pub fn add_document<S: AsRef<str>>(&mut self, label: Label, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            match self.words.get_mut(word) {
                Some(entry) => entry.add_occurrences(label, 1),
                None => {
                    let mut entry = QuantifiedWord::new(word);
                    entry.add_occurrences(label, 1);
                    self.words.insert(word.to_string(), entry);
                }
            }
        }
        match label {
            Label::Ham => self.ham_documents += 1,
            Label::Spam => self.spam_documents += 1,
        }
    }

    /// Combine the counts of two builders.
    pub fn merge(mut self, other: VocabularyBuilder) -> Self {
        if self.words.len() < other.words.len() {
            return other.merge(self);
        }
        for (word, counts) in other.words {
            let entry = self
                .words
                .entry(word)
                .or_insert_with_key(|w| QuantifiedWord::new(w.as_str()));
            entry.add_occurrences(Label::Ham, counts.ham_frequency);
            entry.add_occurrences(Label::Spam, counts.spam_frequency);
        }
        self.ham_documents += other.ham_documents;
        self.spam_documents += other.spam_documents;
        self
    }

    /// Documents added for `label`.
    pub fn document_count(&self, label: Label) -> usize {
        match label {
            Label::Ham => self.ham_documents,
            Label::Spam => self.spam_documents,
        }
    }

    /// Distinct words seen so far.
    pub fn distinct_words(&self) -> usize {
        self.words.len()
    }

    /// Prune rare words and return the retained vocabulary.
    ///
    /// A word is dropped when it was seen fewer than
    /// [`MIN_RETAINED_FREQUENCY`] times in both classes.
    pub fn build(self) -> (Vocabulary, PruneStats) {
        let mut stats = PruneStats {
            distinct_words: self.words.len(),
            ..Default::default()
        };

        // Retained totals never exceed the raw ones, which count analyzed tokens.
        let mut vocabulary = Vocabulary::new();
        for (key, word) in self.words {
            stats.raw_ham_word_count += word.ham_frequency;
            stats.raw_spam_word_count += word.spam_frequency;
            if word.is_retained() {
                vocabulary.ham_word_count += word.ham_frequency;
                vocabulary.spam_word_count += word.spam_frequency;
                vocabulary.words.insert(key, word);
            } else {
                stats.pruned_words += 1;
            }
        }

        debug!(
            "pruned {} of {} distinct words (ham total {} -> {}, spam total {} -> {})",
            stats.pruned_words,
            stats.distinct_words,
            stats.raw_ham_word_count,
            vocabulary.ham_word_count(),
            stats.raw_spam_word_count,
            vocabulary.spam_word_count()
        );

        (vocabulary, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_counts_include_duplicates() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(Label::Ham, &words("loan loan offer"));
        builder.add_document(Label::Spam, &words("loan scam"));

        let (vocabulary, stats) = builder.build();
        let loan = vocabulary.get("loan").unwrap();
        assert_eq!(loan.ham_frequency(), 2);
        assert_eq!(loan.spam_frequency(), 1);
        assert_eq!(stats.distinct_words, 3);
        assert_eq!(stats.pruned_words, 2);
    }

    #[test]
    fn test_pruning_boundary() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(Label::Ham, &words("once twice twice mixed"));
        builder.add_document(Label::Spam, &words("mixed spammy spammy"));

        let (vocabulary, stats) = builder.build();
        assert!(!vocabulary.contains("once"));
        // 1 ham + 1 spam is still below the threshold in both classes.
        assert!(!vocabulary.contains("mixed"));
        assert!(vocabulary.contains("twice"));
        assert!(vocabulary.contains("spammy"));
        assert_eq!(stats.retained_words(), 2);
        assert_eq!(stats.raw_ham_word_count, 4);
        assert_eq!(stats.raw_spam_word_count, 3);
    }

    #[test]
    fn test_totals_match_retained_frequencies() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(Label::Ham, &words("alpha alpha beta gamma gamma gamma"));
        builder.add_document(Label::Spam, &words("alpha delta delta beta"));

        let (vocabulary, _) = builder.build();
        let ham: u64 = vocabulary.iter().map(|w| w.ham_frequency()).sum();
        let spam: u64 = vocabulary.iter().map(|w| w.spam_frequency()).sum();
        assert_eq!(vocabulary.ham_word_count(), ham);
        assert_eq!(vocabulary.spam_word_count(), spam);
        assert_eq!(ham, 5);
        assert_eq!(spam, 3);
    }

    #[test]
    fn test_merge_equals_sequential() {
        let docs = [
            (Label::Ham, "meeting agenda meeting"),
            (Label::Spam, "winner prize winner"),
            (Label::Ham, "agenda notes prize"),
            (Label::Spam, "prize claim"),
        ];

        let mut sequential = VocabularyBuilder::new();
        for (label, text) in &docs {
            sequential.add_document(*label, &words(text));
        }

        let mut left = VocabularyBuilder::new();
        let mut right = VocabularyBuilder::new();
        for (i, (label, text)) in docs.iter().enumerate() {
            if i % 2 == 0 {
                left.add_document(*label, &words(text));
            } else {
                right.add_document(*label, &words(text));
            }
        }
        let merged = left.merge(right);

        assert_eq!(merged.document_count(Label::Ham), 2);
        assert_eq!(merged.document_count(Label::Spam), 2);
        assert_eq!(merged.build().0, sequential.build().0);
    }

    #[test]
    fn test_sorted_by_word() {
        let vocabulary = Vocabulary::from_words([
            QuantifiedWord::with_frequencies("scam", 0, 2),
            QuantifiedWord::with_frequencies("bank", 2, 2),
            QuantifiedWord::with_frequencies("loan", 3, 0),
        ])
        .unwrap();
        let order: Vec<&str> = vocabulary.sorted().iter().map(|w| w.word()).collect();
        assert_eq!(order, vec!["bank", "loan", "scam"]);
    }

    #[test]
    fn test_insert_replaces_and_rebalances() {
        let mut vocabulary = Vocabulary::new();
        vocabulary.insert(QuantifiedWord::with_frequencies("loan", 3, 1)).unwrap();
        let previous = vocabulary
            .insert(QuantifiedWord::with_frequencies("loan", 2, 2))
            .unwrap();
        assert!(previous.is_some());
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary.ham_word_count(), 2);
        assert_eq!(vocabulary.spam_word_count(), 2);
    }

    #[test]
    fn test_insert_overflow_leaves_totals_unchanged() {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .insert(QuantifiedWord::with_frequencies("bank", u64::MAX, 0))
            .unwrap();
        let result = vocabulary.insert(QuantifiedWord::with_frequencies("loan", 1, 0));

        assert!(matches!(result, Err(SpamFilterError::InvalidOperation(_))));
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary.ham_word_count(), u64::MAX);

        // Replacing the word that holds the total is not an overflow.
        vocabulary
            .insert(QuantifiedWord::with_frequencies("bank", 5, 0))
            .unwrap();
        assert_eq!(vocabulary.ham_word_count(), 5);
    }

    #[test]
    fn test_unestimated_word() {
        let word = QuantifiedWord::with_frequencies("bank", 2, 2);
        assert!(!word.is_estimated());
        assert_eq!(word.probability(Label::Ham), None);
    }
}
