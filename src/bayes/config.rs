//! Configuration for training and classification.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::config::AnalysisConfig;
use crate::error::{Result, SpamFilterError};

/// Default additive smoothing constant.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.1;

/// All tunables of a training run, also needed to classify against its model.
///
/// Analysis options are flattened, so a JSON file reads:
///
/// ```json
/// { "min_word_length": 4, "max_word_length": 22, "smoothing_factor": 0.1,
///   "case_folding": true, "strip_markup": true, "use_stopwords": true,
///   "stopwords_path": "stopwords.txt" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Document analysis options.
    #[serde(flatten)]
    pub analysis: AnalysisConfig,

    /// Additive smoothing constant α (> 0).
    pub smoothing_factor: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

impl ClassifierConfig {
    /// Load a configuration from a JSON file; missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| SpamFilterError::path_io(path, e))?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        if !self.smoothing_factor.is_finite() || self.smoothing_factor <= 0.0 {
            return Err(SpamFilterError::configuration(format!(
                "smoothing_factor must be a positive number, got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert_eq!(config.smoothing_factor, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_smoothing() {
        for smoothing_factor in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = ClassifierConfig {
                smoothing_factor,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SpamFilterError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_flat_json_layout() {
        let json = serde_json::to_value(ClassifierConfig::default()).unwrap();
        assert_eq!(json["min_word_length"], 4);
        assert_eq!(json["smoothing_factor"], 0.1);
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"smoothing_factor": 0.5, "use_stopwords": false}}"#).unwrap();

        let config = ClassifierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.smoothing_factor, 0.5);
        assert!(!config.analysis.use_stopwords);
        assert_eq!(config.analysis.max_word_length, 22);
    }

    #[test]
    fn test_from_file_with_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        assert!(matches!(
            ClassifierConfig::from_file(file.path()),
            Err(SpamFilterError::Json(_))
        ));
    }
}
