//! Accuracy of a model on labeled test documents.

use serde::Serialize;

use crate::bayes::types::{ClassificationResult, Label};
use crate::error::{Result, SpamFilterError};

/// Counts of expected vs. predicted labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// Ham classified as ham.
    pub true_ham: usize,
    /// Ham classified as spam.
    pub false_spam: usize,
    /// Spam classified as spam.
    pub true_spam: usize,
    /// Spam classified as ham.
    pub false_ham: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, expected: Label, predicted: Label) {
        match (expected, predicted) {
            (Label::Ham, Label::Ham) => self.true_ham += 1,
            (Label::Ham, Label::Spam) => self.false_spam += 1,
            (Label::Spam, Label::Spam) => self.true_spam += 1,
            (Label::Spam, Label::Ham) => self.false_ham += 1,
        }
    }

    pub fn correct(&self) -> usize {
        self.true_ham + self.true_spam
    }

    pub fn total(&self) -> usize {
        self.true_ham + self.false_spam + self.true_spam + self.false_ham
    }

    /// Documents whose expected label is `label`.
    pub fn support(&self, label: Label) -> usize {
        match label {
            Label::Ham => self.true_ham + self.false_spam,
            Label::Spam => self.true_spam + self.false_ham,
        }
    }
}

/// Expected and predicted label of one test document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentOutcome {
    pub document_name: String,
    pub expected: Label,
    pub predicted: Label,
}

impl DocumentOutcome {
    pub fn is_correct(&self) -> bool {
        self.expected == self.predicted
    }
}

/// Outcome of classifying a labeled test set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evaluation {
    pub matrix: ConfusionMatrix,
    /// One entry per document, in input order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl Evaluation {
    /// Compare results against the expected labels, pairwise.
    pub fn from_results(expected: &[Label], results: &[ClassificationResult]) -> Result<Self> {
        if expected.len() != results.len() {
            return Err(SpamFilterError::invalid_operation(format!(
                "{} expected labels for {} results",
                expected.len(),
                results.len()
            )));
        }

        let mut evaluation = Evaluation::default();
        for (label, result) in expected.iter().zip(results) {
            evaluation.matrix.record(*label, result.label);
            evaluation.outcomes.push(DocumentOutcome {
                document_name: result.document_name.clone(),
                expected: *label,
                predicted: result.label,
            });
        }
        Ok(evaluation)
    }

    pub fn correct(&self) -> usize {
        self.matrix.correct()
    }

    /// Documents whose predicted label differs from the expected one.
    pub fn misclassified(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_correct())
    }

    pub fn total(&self) -> usize {
        self.matrix.total()
    }

    /// Percentage of correctly classified documents; 0 when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => 100.0 * self.correct() as f64 / total as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, label: Label) -> ClassificationResult {
        match label {
            Label::Ham => ClassificationResult::new(name, -1.0, -2.0),
            Label::Spam => ClassificationResult::new(name, -2.0, -1.0),
        }
    }

    #[test]
    fn test_confusion_matrix() {
        let expected = [Label::Ham, Label::Ham, Label::Spam, Label::Spam, Label::Spam];
        let results = [
            result("h1", Label::Ham),
            result("h2", Label::Spam),
            result("s1", Label::Spam),
            result("s2", Label::Spam),
            result("s3", Label::Ham),
        ];

        let evaluation = Evaluation::from_results(&expected, &results).unwrap();
        assert_eq!(
            evaluation.matrix,
            ConfusionMatrix {
                true_ham: 1,
                false_spam: 1,
                true_spam: 2,
                false_ham: 1,
            }
        );
        assert_eq!(evaluation.correct(), 3);
        assert_eq!(evaluation.total(), 5);
        assert!((evaluation.accuracy() - 60.0).abs() < 1e-12);
        let wrong: Vec<&str> = evaluation
            .misclassified()
            .map(|o| o.document_name.as_str())
            .collect();
        assert_eq!(wrong, vec!["h2", "s3"]);
        assert!(evaluation.outcomes[0].is_correct());
        assert_eq!(evaluation.matrix.support(Label::Spam), 3);
    }

    #[test]
    fn test_empty_evaluation() {
        let evaluation = Evaluation::from_results(&[], &[]).unwrap();
        assert_eq!(evaluation.total(), 0);
        assert_eq!(evaluation.accuracy(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(Evaluation::from_results(&[Label::Ham], &[]).is_err());
    }
}
