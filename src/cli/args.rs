//! Command line argument parsing for the spamfilter CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::bayes::ClassifierConfig;
use crate::error::Result;

/// spamfilter - A Naive Bayes ham/spam classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "spamfilter")]
#[command(about = "Train and apply a Naive Bayes ham/spam classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamFilterArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamFilterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a ham and a spam directory
    Train(TrainArgs),

    /// Classify files or directories of files
    Classify(ClassifyArgs),

    /// Measure accuracy on labeled test directories
    Evaluate(EvaluateArgs),

    /// Show model statistics
    Stats(StatsArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Directory of ham documents
    #[arg(value_name = "HAM_DIR")]
    pub ham_dir: PathBuf,

    /// Directory of spam documents
    #[arg(value_name = "SPAM_DIR")]
    pub spam_dir: PathBuf,

    /// Where to write the model file
    #[arg(short, long, value_name = "MODEL")]
    pub output: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Files or directories to classify
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Also write one line per document to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Directory of ham test documents
    #[arg(long, value_name = "DIR")]
    pub ham: PathBuf,

    /// Directory of spam test documents
    #[arg(long, value_name = "DIR")]
    pub spam: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for model statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Number of most indicative words to list per class
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Analysis and smoothing options shared by the commands
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stopwords file, one word per line
    #[arg(long, value_name = "FILE", conflicts_with = "no_stopwords")]
    pub stopwords: Option<PathBuf>,

    /// Keep stop words
    #[arg(long)]
    pub no_stopwords: bool,

    /// Keep the original case of words
    #[arg(long)]
    pub no_case_folding: bool,

    /// Do not remove <...> markup
    #[arg(long)]
    pub no_strip_markup: bool,

    /// Minimum word length
    #[arg(long, value_name = "N")]
    pub min_word_length: Option<usize>,

    /// Maximum word length
    #[arg(long, value_name = "N")]
    pub max_word_length: Option<usize>,

    /// Smoothing factor
    #[arg(long, value_name = "ALPHA")]
    pub smoothing: Option<f64>,
}

impl AnalysisArgs {
    /// Load the config file (or defaults) and apply the flags on top.
    pub fn to_config(&self) -> Result<ClassifierConfig> {
        let mut config = match &self.config {
            Some(path) => ClassifierConfig::from_file(path)?,
            None => ClassifierConfig::default(),
        };

        let analysis = &mut config.analysis;
        if let Some(path) = &self.stopwords {
            analysis.use_stopwords = true;
            analysis.stopwords_path = Some(path.clone());
        }
        if self.no_stopwords {
            analysis.use_stopwords = false;
        }
        if self.no_case_folding {
            analysis.case_folding = false;
        }
        if self.no_strip_markup {
            analysis.strip_markup = false;
        }
        if let Some(min) = self.min_word_length {
            analysis.min_word_length = min;
        }
        if let Some(max) = self.max_word_length {
            analysis.max_word_length = max;
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing_factor = smoothing;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        SpamFilterArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_train() {
        let args = SpamFilterArgs::try_parse_from([
            "spamfilter", "-vv", "train", "ham", "spam", "-o", "model.txt", "--no-stopwords",
            "--smoothing", "0.5",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        let Command::Train(train) = args.command else {
            panic!("expected train command");
        };
        assert_eq!(train.output, PathBuf::from("model.txt"));

        let config = train.analysis.to_config().unwrap();
        assert!(!config.analysis.use_stopwords);
        assert_eq!(config.smoothing_factor, 0.5);
    }

    #[test]
    fn test_parse_classify_many_inputs() {
        let args = SpamFilterArgs::try_parse_from([
            "spamfilter", "-q", "-f", "json", "classify", "model.txt", "a.eml", "inbox",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        let Command::Classify(classify) = args.command else {
            panic!("expected classify command");
        };
        assert_eq!(classify.inputs.len(), 2);
        assert!(classify.output.is_none());
    }

    #[test]
    fn test_classify_requires_input() {
        assert!(SpamFilterArgs::try_parse_from(["spamfilter", "classify", "model.txt"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"min_word_length": 3, "case_folding": false, "smoothing_factor": 0.2}"#,
        )
        .unwrap();

        let args = AnalysisArgs {
            config: Some(file.path().to_path_buf()),
            min_word_length: Some(5),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.analysis.min_word_length, 5);
        assert!(!config.analysis.case_folding);
        assert_eq!(config.smoothing_factor, 0.2);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = AnalysisArgs {
            min_word_length: Some(30),
            ..Default::default()
        };
        assert!(args.to_config().is_err());
    }
}
