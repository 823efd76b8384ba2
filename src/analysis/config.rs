//! Configuration for document analysis.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamFilterError};

/// Shortest word kept in the vocabulary.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// Longest word kept in the vocabulary.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 22;

/// Tunables of the analysis pipeline.
///
/// The same value must be used for training and for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum accepted word length in characters (inclusive).
    pub min_word_length: usize,

    /// Maximum accepted word length in characters (inclusive).
    pub max_word_length: usize,

    /// Lowercase tokens and stop words.
    pub case_folding: bool,

    /// Remove `<...>` markup before tokenizing.
    pub strip_markup: bool,

    /// Drop stop words.
    pub use_stopwords: bool,

    /// Stopwords file, one word per line.
    /// If None while `use_stopwords` is set, the built-in English list is used.
    pub stopwords_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            case_folding: true,
            strip_markup: true,
            use_stopwords: true,
            stopwords_path: None,
        }
    }
}

impl AnalysisConfig {
    /// Check the word length bounds.
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(SpamFilterError::configuration(
                "min_word_length must be at least 1",
            ));
        }
        if self.min_word_length > self.max_word_length {
            return Err(SpamFilterError::configuration(format!(
                "min_word_length ({}) exceeds max_word_length ({})",
                self.min_word_length, self.max_word_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_word_length, 4);
        assert_eq!(config.max_word_length, 22);
        assert!(config.case_folding);
        assert!(config.strip_markup);
        assert!(config.use_stopwords);
        assert!(config.stopwords_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = AnalysisConfig {
            min_word_length: 10,
            max_word_length: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpamFilterError::Configuration(_))
        ));

        let config = AnalysisConfig {
            min_word_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"case_folding": false, "max_word_length": 30}"#).unwrap();
        assert!(!config.case_folding);
        assert_eq!(config.max_word_length, 30);
        assert_eq!(config.min_word_length, 4);
    }
}
