//! Class priors and Laplace-smoothed conditional probabilities.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bayes::types::Label;
use crate::bayes::vocabulary::Vocabulary;
use crate::error::{Result, SpamFilterError};

/// How far `ham + spam` may stray from 1 in priors given directly.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// Prior class probabilities, the fraction of training documents in each class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Priors {
    ham: f64,
    spam: f64,
}

impl Priors {
    /// Priors from the number of training documents per class.
    ///
    /// Both classes need at least one document.
    pub fn from_counts(ham_documents: usize, spam_documents: usize) -> Result<Self> {
        if ham_documents == 0 {
            return Err(SpamFilterError::configuration("ham corpus is empty"));
        }
        if spam_documents == 0 {
            return Err(SpamFilterError::configuration("spam corpus is empty"));
        }

        let total = (ham_documents + spam_documents) as f64;
        Ok(Priors {
            ham: ham_documents as f64 / total,
            spam: spam_documents as f64 / total,
        })
    }

    /// Priors given directly, each in [0, 1] and summing to 1.
    pub fn new(ham: f64, spam: f64) -> Result<Self> {
        for (name, value) in [("ham", ham), ("spam", spam)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SpamFilterError::configuration(format!(
                    "{name} prior must be within [0, 1], got {value}"
                )));
            }
        }
        if (ham + spam - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(SpamFilterError::configuration(format!(
                "priors must sum to 1, got {ham} + {spam}"
            )));
        }
        Ok(Priors { ham, spam })
    }

    pub fn ham(&self) -> f64 {
        self.ham
    }

    pub fn spam(&self) -> f64 {
        self.spam
    }

    pub fn of(&self, label: Label) -> f64 {
        match label {
            Label::Ham => self.ham,
            Label::Spam => self.spam,
        }
    }
}

/// Additive (Laplace) smoothing estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimator {
    smoothing_factor: f64,
}

impl Estimator {
    /// `smoothing_factor` must be finite and positive.
    pub fn new(smoothing_factor: f64) -> Result<Self> {
        if !smoothing_factor.is_finite() || smoothing_factor <= 0.0 {
            return Err(SpamFilterError::configuration(format!(
                "smoothing_factor must be a positive number, got {smoothing_factor}"
            )));
        }
        Ok(Estimator { smoothing_factor })
    }

    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    /// (frequency + α) / (class_total + |V|·α)
    pub fn conditional(&self, frequency: u64, class_total: u64, vocabulary_size: usize) -> f64 {
        let alpha = self.smoothing_factor;
        (frequency as f64 + alpha) / (class_total as f64 + vocabulary_size as f64 * alpha)
    }

    /// Set both conditional probabilities on every word.
    ///
    /// Overwrites earlier estimates, so running twice gives the same result.
    pub fn estimate(&self, vocabulary: &mut Vocabulary) {
        let size = vocabulary.len();
        let ham_total = vocabulary.ham_word_count();
        let spam_total = vocabulary.spam_word_count();

        for word in vocabulary.words_mut() {
            let ham = self.conditional(word.ham_frequency(), ham_total, size);
            let spam = self.conditional(word.spam_frequency(), spam_total, size);
            word.set_probabilities(ham, spam);
        }

        debug!(
            "estimated {} words with alpha={} (ham total {}, spam total {})",
            size, self.smoothing_factor, ham_total, spam_total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayes::vocabulary::QuantifiedWord;

    fn loan_bank_vocabulary() -> Vocabulary {
        Vocabulary::from_words([
            QuantifiedWord::with_frequencies("loan", 3, 0),
            QuantifiedWord::with_frequencies("offer", 2, 0),
            QuantifiedWord::with_frequencies("bank", 2, 2),
            QuantifiedWord::with_frequencies("scam", 0, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_priors_are_document_fractions() {
        let priors = Priors::from_counts(2, 1).unwrap();
        assert!((priors.ham() - 2.0 / 3.0).abs() < 1e-12);
        assert!((priors.of(Label::Spam) - 1.0 / 3.0).abs() < 1e-12);
        assert!((priors.ham() + priors.spam() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_class_is_configuration_error() {
        assert!(matches!(
            Priors::from_counts(0, 3),
            Err(SpamFilterError::Configuration(_))
        ));
        assert!(matches!(
            Priors::from_counts(3, 0),
            Err(SpamFilterError::Configuration(_))
        ));
    }

    #[test]
    fn test_priors_range_checked() {
        assert!(Priors::new(0.5, 0.5).is_ok());
        assert!(Priors::new(1.0, 0.0).is_ok());
        assert!(Priors::new(1.2, 0.0).is_err());
        assert!(Priors::new(0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_priors_must_sum_to_one() {
        assert!(matches!(
            Priors::new(0.9, 0.9),
            Err(SpamFilterError::Configuration(_))
        ));
        assert!(Priors::new(0.2, 0.7).is_err());
        // Shortest round-trip renderings of 2/3 and 1/3.
        assert!(Priors::new(0.6666666666666666, 0.3333333333333333).is_ok());
    }

    #[test]
    fn test_smoothed_probabilities() {
        let mut vocabulary = loan_bank_vocabulary();
        Estimator::new(0.1).unwrap().estimate(&mut vocabulary);

        // ham total 7, spam total 4, |V| = 4
        let loan = vocabulary.get("loan").unwrap();
        assert!((loan.ham_probability().unwrap() - 3.1 / 7.4).abs() < 1e-12);
        assert!((loan.spam_probability().unwrap() - 0.1 / 4.4).abs() < 1e-12);
        let scam = vocabulary.get("scam").unwrap();
        assert!((scam.spam_probability().unwrap() - 2.1 / 4.4).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_to_one_per_class() {
        let mut vocabulary = loan_bank_vocabulary();
        Estimator::new(0.1).unwrap().estimate(&mut vocabulary);

        for label in Label::ALL {
            let sum: f64 = vocabulary
                .iter()
                .map(|w| w.probability(label).unwrap())
                .sum();
            assert!((sum - 1.0).abs() < 1e-9, "{label} sums to {sum}");
        }
        assert!(vocabulary
            .iter()
            .all(|w| w.ham_probability().unwrap() > 0.0 && w.spam_probability().unwrap() > 0.0));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let estimator = Estimator::new(0.1).unwrap();
        let mut once = loan_bank_vocabulary();
        estimator.estimate(&mut once);
        let mut twice = once.clone();
        estimator.estimate(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejects_bad_smoothing() {
        assert!(Estimator::new(0.0).is_err());
        assert!(Estimator::new(-1.0).is_err());
    }
}
