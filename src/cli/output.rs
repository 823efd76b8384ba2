//! Output formatting for CLI commands.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bayes::{ClassificationResult, ConfusionMatrix, Label, Model};
use crate::cli::args::{OutputFormat, SpamFilterArgs};
use crate::error::{Result, SpamFilterError};

/// Reports that have a human-readable rendering.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Result structure for training.
#[derive(Debug, Serialize)]
pub struct TrainingSummary {
    pub model_path: PathBuf,
    pub ham_documents: usize,
    pub spam_documents: usize,
    pub ham_prior: f64,
    pub spam_prior: f64,
    pub distinct_words: usize,
    pub pruned_words: usize,
    pub retained_words: usize,
    pub ham_word_count: u64,
    pub spam_word_count: u64,
    pub duration_ms: u64,
}

/// Result structure for classification.
#[derive(Debug, Serialize)]
pub struct ClassificationReport {
    pub results: Vec<ClassificationResult>,
    pub ham: usize,
    pub spam: usize,
}

impl ClassificationReport {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        let spam = results.iter().filter(|r| r.is_spam()).count();
        ClassificationReport {
            ham: results.len() - spam,
            spam,
            results,
        }
    }
}

/// Result structure for evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
    pub matrix: ConfusionMatrix,
    pub misclassified: Vec<String>,
}

/// A word and how strongly it points to one class.
#[derive(Debug, Serialize)]
pub struct IndicativeWord {
    pub word: String,
    pub log_ratio: f64,
    pub ham_frequency: u64,
    pub spam_frequency: u64,
}

/// Model statistics.
#[derive(Debug, Serialize)]
pub struct ModelStats {
    pub ham_corpus_path: PathBuf,
    pub spam_corpus_path: PathBuf,
    pub ham_prior: f64,
    pub spam_prior: f64,
    pub vocabulary_size: usize,
    pub ham_word_count: u64,
    pub spam_word_count: u64,
    pub top_ham: Vec<IndicativeWord>,
    pub top_spam: Vec<IndicativeWord>,
}

impl ModelStats {
    pub fn from_model(model: &Model, top: usize) -> Self {
        let indicative = |label: Label| {
            model
                .most_indicative(label, top)
                .into_iter()
                .map(|(word, log_ratio)| IndicativeWord {
                    word: word.word().to_string(),
                    log_ratio,
                    ham_frequency: word.ham_frequency(),
                    spam_frequency: word.spam_frequency(),
                })
                .collect::<Vec<_>>()
        };

        ModelStats {
            ham_corpus_path: model.ham_corpus_path().to_path_buf(),
            spam_corpus_path: model.spam_corpus_path().to_path_buf(),
            ham_prior: model.ham_prior(),
            spam_prior: model.spam_prior(),
            vocabulary_size: model.vocabulary().len(),
            ham_word_count: model.vocabulary().ham_word_count(),
            spam_word_count: model.vocabulary().spam_word_count(),
            top_ham: indicative(Label::Ham),
            top_spam: indicative(Label::Spam),
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &SpamFilterArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpamFilterArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Write one `index   name   label   ham   spam` line per result.
pub fn write_results_file(path: &Path, results: &[ClassificationResult]) -> Result<()> {
    let file = File::create(path).map_err(|e| SpamFilterError::path_io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_results(&mut writer, results)?;
    writer.flush().map_err(|e| SpamFilterError::path_io(path, e))
}

pub fn write_results<W: Write>(writer: &mut W, results: &[ClassificationResult]) -> Result<()> {
    for (index, result) in results.iter().enumerate() {
        writeln!(
            writer,
            "{}   {}   {}   {}   {}",
            index + 1,
            result.document_name,
            result.label,
            result.ham_log_score,
            result.spam_log_score
        )?;
    }
    Ok(())
}

impl HumanReadable for TrainingSummary {
    fn print_human(&self) {
        println!("Training Summary:");
        println!("═════════════════");
        println!("Model file: {}", self.model_path.display());
        println!(
            "Documents: {} ham, {} spam",
            self.ham_documents, self.spam_documents
        );
        println!("Priors: ham {:.4}, spam {:.4}", self.ham_prior, self.spam_prior);
        println!(
            "Vocabulary: {} words retained, {} of {} pruned",
            self.retained_words, self.pruned_words, self.distinct_words
        );
        println!(
            "Word counts: ham {}, spam {}",
            self.ham_word_count, self.spam_word_count
        );
        println!("Training time: {}ms", self.duration_ms);
    }
}

impl HumanReadable for ClassificationReport {
    fn print_human(&self) {
        for (index, result) in self.results.iter().enumerate() {
            println!(
                "{:>4}  {:<5} {:>12.4} {:>12.4}  {}",
                index + 1,
                result.label.as_str(),
                result.ham_log_score,
                result.spam_log_score,
                result.document_name
            );
        }
        println!();
        println!(
            "{} documents: {} ham, {} spam",
            self.results.len(),
            self.ham,
            self.spam
        );
    }
}

impl HumanReadable for EvaluationReport {
    fn print_human(&self) {
        println!("Evaluation Results:");
        println!("═══════════════════");
        println!(
            "Accuracy: {:.2}% ({}/{})",
            self.accuracy, self.correct, self.total
        );
        println!();
        println!("Confusion Matrix (rows: actual, columns: predicted):");
        println!("──────────────────────────────────────────────────");
        println!("{:>8} {:>8} {:>8}", "", "ham", "spam");
        println!(
            "{:>8} {:>8} {:>8}",
            "ham", self.matrix.true_ham, self.matrix.false_spam
        );
        println!(
            "{:>8} {:>8} {:>8}",
            "spam", self.matrix.false_ham, self.matrix.true_spam
        );

        if !self.misclassified.is_empty() {
            println!();
            println!("Misclassified:");
            for name in &self.misclassified {
                println!("  {name}");
            }
        }
    }
}

impl HumanReadable for ModelStats {
    fn print_human(&self) {
        println!("Model Statistics:");
        println!("═════════════════");
        println!("Ham corpus: {}", self.ham_corpus_path.display());
        println!("Spam corpus: {}", self.spam_corpus_path.display());
        println!("Priors: ham {:.4}, spam {:.4}", self.ham_prior, self.spam_prior);
        println!("Vocabulary size: {}", self.vocabulary_size);
        println!(
            "Word counts: ham {}, spam {}",
            self.ham_word_count, self.spam_word_count
        );

        for (title, words) in [("Top ham words:", &self.top_ham), ("Top spam words:", &self.top_spam)] {
            if words.is_empty() {
                continue;
            }
            println!();
            println!("{title}");
            for word in words {
                println!(
                    "  {:<22} {:>8.4}  (ham {}, spam {})",
                    word.word, word.log_ratio, word.ham_frequency, word.spam_frequency
                );
            }
        }
    }
}
