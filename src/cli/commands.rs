//! Command implementations for the spamfilter CLI.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::SpamAnalyzer;
use crate::bayes::{
    Evaluation, Label, NaiveBayesClassifier, Trainer, export_model, import_model,
};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::{Corpus, Document};
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SpamFilterArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Train a model and write it to disk.
fn train(args: &TrainArgs, cli_args: &SpamFilterArgs) -> Result<()> {
    let config = args.analysis.to_config()?;
    debug!("training with {config:?}");

    let start_time = Instant::now();
    let ham = Corpus::load_dir(&args.ham_dir)?;
    let spam = Corpus::load_dir(&args.spam_dir)?;
    let (model, stats) = Trainer::from_config(&config)?.train_with_stats(&ham, &spam)?;
    export_model(&model, &args.output)?;

    output_result(
        "Model trained successfully",
        &TrainingSummary {
            model_path: args.output.clone(),
            ham_documents: ham.len(),
            spam_documents: spam.len(),
            ham_prior: model.ham_prior(),
            spam_prior: model.spam_prior(),
            distinct_words: stats.distinct_words,
            pruned_words: stats.pruned_words,
            retained_words: stats.retained_words(),
            ham_word_count: model.vocabulary().ham_word_count(),
            spam_word_count: model.vocabulary().spam_word_count(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Classify files and directories against a stored model.
fn classify(args: &ClassifyArgs, cli_args: &SpamFilterArgs) -> Result<()> {
    let classifier = load_classifier(&args.model, &args.analysis)?;
    let results = classifier.classify_paths(&args.inputs)?;

    if let Some(path) = &args.output {
        write_results_file(path, &results)?;
        info!("wrote {} results to {}", results.len(), path.display());
    }

    output_result(
        "Classification complete",
        &ClassificationReport::new(results),
        cli_args,
    )
}

/// Classify labeled test directories and report accuracy.
fn evaluate(args: &EvaluateArgs, cli_args: &SpamFilterArgs) -> Result<()> {
    let classifier = load_classifier(&args.model, &args.analysis)?;

    let mut documents: Vec<Document> = Vec::new();
    let mut expected = Vec::new();
    for (dir, label) in [(&args.ham, Label::Ham), (&args.spam, Label::Spam)] {
        let corpus = Corpus::load_dir(dir)?;
        expected.extend(std::iter::repeat_n(label, corpus.len()));
        documents.extend(corpus.documents().iter().cloned());
    }

    let results = classifier.classify_batch(&documents)?;
    let evaluation = Evaluation::from_results(&expected, &results)?;

    output_result(
        "Evaluation complete",
        &EvaluationReport {
            correct: evaluation.correct(),
            total: evaluation.total(),
            accuracy: evaluation.accuracy(),
            matrix: evaluation.matrix,
            misclassified: evaluation
                .misclassified()
                .map(|outcome| outcome.document_name.clone())
                .collect(),
        },
        cli_args,
    )
}

/// Show statistics of a stored model.
fn show_stats(args: &StatsArgs, cli_args: &SpamFilterArgs) -> Result<()> {
    let model = import_model(&args.model)?;
    output_result(
        "Model statistics",
        &ModelStats::from_model(&model, args.top),
        cli_args,
    )
}

fn load_classifier(
    model_path: &std::path::Path,
    analysis: &AnalysisArgs,
) -> Result<NaiveBayesClassifier> {
    let config = analysis.to_config()?;
    let model = import_model(model_path)?;
    let analyzer = SpamAnalyzer::from_config(&config.analysis)?;
    Ok(NaiveBayesClassifier::new(Arc::new(model), analyzer))
}
