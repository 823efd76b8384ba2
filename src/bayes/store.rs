//! Plain-text model files.
//!
//! A model file has one header line followed by one line per word, sorted by
//! word, with fields separated by three spaces:
//!
//! ```text
//! <ham corpus path>   <spam corpus path>   <ham prior>   <spam prior>
//! 1   bank   2   0.28378378378378377   2   0.4772727272727273
//! 2   loan   3   0.41891891891891897   0   0.022727272727272728
//! ```
//!
//! An unset probability is written as `N/A`. On import, fields may be
//! separated by any run of whitespace and the class totals are recomputed from
//! the word frequencies. Models trained on in-memory corpora carry
//! [`IN_MEMORY_CORPUS_PATH`](crate::bayes::IN_MEMORY_CORPUS_PATH) as their
//! corpus paths.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::bayes::estimator::Priors;
use crate::bayes::model::Model;
use crate::bayes::vocabulary::{QuantifiedWord, Vocabulary};
use crate::error::{Result, SpamFilterError};

/// Written in place of a probability that has not been estimated.
pub const UNSET_PROBABILITY: &str = "N/A";

const FIELD_SEPARATOR: &str = "   ";
const HEADER_FIELDS: usize = 4;
const WORD_FIELDS: usize = 6;

/// Write `model` to `path`, replacing any existing file.
pub fn export_model<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpamFilterError::path_io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_model(model, &mut writer)?;
    writer.flush().map_err(|e| SpamFilterError::path_io(path, e))?;

    info!(
        "exported model with {} words to {}",
        model.vocabulary().len(),
        path.display()
    );
    Ok(())
}

/// Write `model` in the text format.
///
/// Corpus paths containing whitespace cannot be read back and are rejected.
pub fn write_model<W: Write>(model: &Model, writer: &mut W) -> Result<()> {
    let ham_path = header_path(model.ham_corpus_path())?;
    let spam_path = header_path(model.spam_corpus_path())?;

    writeln!(
        writer,
        "{ham_path}{FIELD_SEPARATOR}{spam_path}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        model.ham_prior(),
        model.spam_prior()
    )?;

    for (index, word) in model.vocabulary().sorted().into_iter().enumerate() {
        writeln!(
            writer,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            index + 1,
            word.word(),
            word.ham_frequency(),
            format_probability(word.ham_probability()),
            word.spam_frequency(),
            format_probability(word.spam_probability())
        )?;
    }
    Ok(())
}

/// Read a model from `path`.
pub fn import_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SpamFilterError::path_io(path, e))?;
    let model = read_model(BufReader::new(file))?;

    info!(
        "imported model with {} words from {}",
        model.vocabulary().len(),
        path.display()
    );
    Ok(model)
}

/// Parse a model from any buffered reader.
pub fn read_model<R: BufRead>(reader: R) -> Result<Model> {
    let mut lines = reader.lines().enumerate();

    let (ham_path, spam_path, priors) = loop {
        match lines.next() {
            None => return Err(SpamFilterError::parse(1, "missing header line")),
            Some((index, line)) => {
                let line = read_line(index + 1, line)?;
                if line.trim().is_empty() {
                    continue;
                }
                break parse_header(index + 1, &line)?;
            }
        }
    };

    let mut vocabulary = Vocabulary::new();
    for (index, line) in lines {
        let number = index + 1;
        let line = read_line(number, line)?;
        if line.trim().is_empty() {
            continue;
        }
        let word = parse_word(number, &line)?;
        if vocabulary.contains(word.word()) {
            return Err(SpamFilterError::parse(
                number,
                format!("duplicate word '{}'", word.word()),
            ));
        }
        vocabulary.insert(word).map_err(|e| at_line(number, e))?;
    }

    Ok(Model::new(ham_path, spam_path, priors, vocabulary))
}

/// Invalid UTF-8 is a malformed model file rather than an I/O failure.
fn read_line(line: usize, result: io::Result<String>) -> Result<String> {
    result.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => SpamFilterError::parse(line, e.to_string()),
        _ => SpamFilterError::Io(e),
    })
}

/// Re-raise a validation error as a parse error on `line`.
fn at_line(line: usize, error: SpamFilterError) -> SpamFilterError {
    match error {
        SpamFilterError::Configuration(message) | SpamFilterError::InvalidOperation(message) => {
            SpamFilterError::parse(line, message)
        }
        other => other,
    }
}

fn header_path(path: &Path) -> Result<String> {
    let text = path.display().to_string();
    if text.is_empty() {
        return Err(SpamFilterError::invalid_operation("corpus path is empty"));
    }
    if text.chars().any(char::is_whitespace) {
        return Err(SpamFilterError::invalid_operation(format!(
            "corpus path '{text}' contains whitespace"
        )));
    }
    Ok(text)
}

fn format_probability(probability: Option<f64>) -> String {
    match probability {
        Some(value) => value.to_string(),
        None => UNSET_PROBABILITY.to_string(),
    }
}

fn fields(line: usize, text: &str, expected: usize, what: &str) -> Result<Vec<String>> {
    let fields: Vec<String> = text.split_whitespace().map(String::from).collect();
    if fields.len() < expected {
        return Err(SpamFilterError::parse(
            line,
            format!("{what} needs {expected} fields, found {}", fields.len()),
        ));
    }
    Ok(fields)
}

fn parse_header(line: usize, text: &str) -> Result<(PathBuf, PathBuf, Priors)> {
    let fields = fields(line, text, HEADER_FIELDS, "header")?;
    let ham = parse_prior(line, &fields[2], "ham")?;
    let spam = parse_prior(line, &fields[3], "spam")?;
    let priors = Priors::new(ham, spam).map_err(|e| at_line(line, e))?;
    Ok((PathBuf::from(&fields[0]), PathBuf::from(&fields[1]), priors))
}

fn parse_prior(line: usize, field: &str, name: &str) -> Result<f64> {
    let value = field.parse::<f64>().map_err(|_| {
        SpamFilterError::parse(line, format!("{name} prior '{field}' is not a number"))
    })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(SpamFilterError::parse(
            line,
            format!("{name} prior {value} is outside [0, 1]"),
        ));
    }
    Ok(value)
}

fn parse_word(line: usize, text: &str) -> Result<QuantifiedWord> {
    let fields = fields(line, text, WORD_FIELDS, "word line")?;

    fields[0].parse::<usize>().map_err(|_| {
        SpamFilterError::parse(line, format!("index '{}' is not an integer", fields[0]))
    })?;

    let word = fields[1].as_str();
    let ham_frequency = parse_frequency(line, &fields[2], "ham")?;
    let ham_probability = parse_probability(line, &fields[3], "ham")?;
    let spam_frequency = parse_frequency(line, &fields[4], "spam")?;
    let spam_probability = parse_probability(line, &fields[5], "spam")?;

    Ok(QuantifiedWord::from_parts(
        word,
        ham_frequency,
        ham_probability,
        spam_frequency,
        spam_probability,
    ))
}

fn parse_frequency(line: usize, field: &str, name: &str) -> Result<u64> {
    field.parse::<u64>().map_err(|_| {
        SpamFilterError::parse(line, format!("{name} frequency '{field}' is not an integer"))
    })
}

fn parse_probability(line: usize, field: &str, name: &str) -> Result<Option<f64>> {
    if field == UNSET_PROBABILITY {
        return Ok(None);
    }
    let value = field.parse::<f64>().map_err(|_| {
        SpamFilterError::parse(line, format!("{name} probability '{field}' is not a number"))
    })?;
    if !(value > 0.0 && value <= 1.0) {
        return Err(SpamFilterError::parse(
            line,
            format!("{name} probability {value} is outside (0, 1]"),
        ));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayes::estimator::Estimator;

    fn model() -> Model {
        let mut vocabulary = Vocabulary::from_words([
            QuantifiedWord::with_frequencies("loan", 3, 0),
            QuantifiedWord::with_frequencies("offer", 2, 0),
            QuantifiedWord::with_frequencies("bank", 2, 2),
            QuantifiedWord::with_frequencies("scam", 0, 2),
        ])
        .unwrap();
        Estimator::new(0.1).unwrap().estimate(&mut vocabulary);
        Model::new(
            "/data/ham",
            "/data/spam",
            Priors::from_counts(2, 1).unwrap(),
            vocabulary,
        )
    }

    fn render(model: &Model) -> String {
        let mut buffer = Vec::new();
        write_model(model, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_layout() {
        let text = render(&model());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("/data/ham   /data/spam   0.6666666666666666   0.3333333333333333"));
        assert!(lines[1].starts_with("1   bank   2   "));
        assert!(lines[2].starts_with("2   loan   3   "));
        assert!(lines[4].starts_with("4   scam   0   "));
    }

    #[test]
    fn test_round_trip() {
        let original = model();
        let restored = read_model(render(&original).as_bytes()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_unset_probability_round_trip() {
        let vocabulary =
            Vocabulary::from_words([QuantifiedWord::with_frequencies("bank", 2, 2)]).unwrap();
        let original = Model::new("h", "s", Priors::new(0.5, 0.5).unwrap(), vocabulary);

        let text = render(&original);
        assert!(text.contains("1   bank   2   N/A   2   N/A"));

        let restored = read_model(text.as_bytes()).unwrap();
        assert_eq!(restored.word("bank").unwrap().ham_probability(), None);
    }

    #[test]
    fn test_import_accepts_any_whitespace_and_exponents() {
        let text = "h\ts 0.5   0.5\n\n1 \t zzzz  2  1.0E-4   3   0.25\n";
        let model = read_model(text.as_bytes()).unwrap();
        let word = model.word("zzzz").unwrap();
        assert_eq!(word.ham_probability(), Some(1.0e-4));
        assert_eq!(model.vocabulary().ham_word_count(), 2);
        assert_eq!(model.vocabulary().spam_word_count(), 3);
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let cases = [
            ("", 1),
            ("h s 0.5\n", 1),
            ("h s half 0.5\n", 1),
            ("h s 1.5 0.5\n", 1),
            ("h s 0.9 0.9\n", 1),
            ("\nh s 0.25 0.5\n", 2),
            ("h s 0.5 0.5\n1 loan 2 0.5 0\n", 2),
            ("h s 0.5 0.5\n1 loan two 0.5 0 0.5\n", 2),
            ("h s 0.5 0.5\n1 loan 2 0.5 0 0.5\n2 scam 0 0.5 2 1.5\n", 3),
            ("h s 0.5 0.5\n1 loan 2 0.5 0 0.5\n2 loan 2 0.5 0 0.5\n", 3),
            ("h s 0.5 0.5\nx loan 2 0.5 0 0.5\n", 2),
            ("h s 0.5 0.5\n1 loan 2 0 0 0.5\n", 2),
            ("h s 0.5 0.5\n1 aaab 18446744073709551615 0.5 0 0.5\n2 bbbc 1 0.5 0 0.5\n", 3),
        ];

        for (text, line) in cases {
            let err = read_model(text.as_bytes()).unwrap_err();
            assert_eq!(err.line(), Some(line), "input {text:?} gave {err}");
        }
    }

    #[test]
    fn test_priors_not_summing_to_one() {
        match read_model("h s 0.9 0.9\n".as_bytes()) {
            Err(SpamFilterError::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("sum to 1"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let mut bytes = b"h s 0.5 0.5\n1 loan 2 0.5 0 0.5\n2 ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" 2 0.5 0 0.5\n");

        let err = read_model(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, SpamFilterError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_empty_corpus_path_rejected() {
        let model = Model::new("", "spam", Priors::new(0.5, 0.5).unwrap(), Vocabulary::new());
        let mut buffer = Vec::new();
        assert!(matches!(
            write_model(&model, &mut buffer),
            Err(SpamFilterError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_whitespace_in_corpus_path_rejected() {
        let model = Model::new("my ham", "spam", Priors::new(0.5, 0.5).unwrap(), Vocabulary::new());
        let mut buffer = Vec::new();
        assert!(matches!(
            write_model(&model, &mut buffer),
            Err(SpamFilterError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_export_import_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.txt");
        let original = model();

        export_model(&original, &path).unwrap();
        assert_eq!(import_model(&path).unwrap(), original);
    }

    #[test]
    fn test_import_missing_file() {
        assert!(matches!(
            import_model("/nonexistent/model.txt"),
            Err(SpamFilterError::PathIo { .. })
        ));
    }
}
