//! Common types for ham/spam classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpamFilterError;

/// Document class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate document.
    Ham,
    /// Unwanted document.
    Spam,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = SpamFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other => Err(SpamFilterError::invalid_operation(format!(
                "unknown label '{other}'"
            ))),
        }
    }
}

/// Outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// File name of the document (or its in-memory name).
    pub document_name: String,
    /// log10 P(ham) + Σ log10 P(word|ham).
    pub ham_log_score: f64,
    /// log10 P(spam) + Σ log10 P(word|spam).
    pub spam_log_score: f64,
    /// Spam iff the spam score is strictly greater; ties are ham.
    pub label: Label,
}

impl ClassificationResult {
    /// Build a result, deriving the label from the scores.
    pub fn new<S: Into<String>>(document_name: S, ham_log_score: f64, spam_log_score: f64) -> Self {
        let label = if spam_log_score > ham_log_score {
            Label::Spam
        } else {
            Label::Ham
        };
        ClassificationResult {
            document_name: document_name.into(),
            ham_log_score,
            spam_log_score,
            label,
        }
    }

    pub fn is_spam(&self) -> bool {
        self.label == Label::Spam
    }

    /// Spam score minus ham score; positive leans spam.
    pub fn margin(&self) -> f64 {
        self.spam_log_score - self.ham_log_score
    }
}
