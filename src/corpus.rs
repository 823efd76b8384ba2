//! Documents and labeled document sets.
//!
//! A [`Document`] is identified by its absolute path: two documents are equal
//! exactly when their path strings are equal, and hashing uses the path
//! only. A [`Corpus`] is the flat set of documents found in one directory.

use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::{Result, SpamFilterError};

/// A document to train on or classify.
#[derive(Debug, Clone)]
pub struct Document {
    /// Absolute path for files, the caller's name for in-memory text.
    path: PathBuf,
    /// File name (or the in-memory name).
    name: String,
    text: String,
}

impl Document {
    /// Read a document from disk.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so mail dumps in legacy
    /// encodings still yield their ASCII words.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| SpamFilterError::path_io(path, e))?;
        let bytes = fs::read(&absolute).map_err(|e| SpamFilterError::path_io(&absolute, e))?;
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| absolute.display().to_string());

        Ok(Document {
            path: absolute,
            name,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Wrap in-memory text as a document named `name`.
    pub fn from_text<N: Into<String>, T: Into<String>>(name: N, text: T) -> Self {
        let name = name.into();
        Document {
            path: PathBuf::from(&name),
            name,
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// A set of documents that all belong to one class.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    root: Option<PathBuf>,
    documents: Vec<Document>,
    seen: AHashSet<PathBuf>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every regular file directly inside `dir`, sorted by path.
    ///
    /// Subdirectories are skipped; nothing is read recursively.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let root = std::path::absolute(dir).map_err(|e| SpamFilterError::path_io(dir, e))?;
        let paths = list_files(&root)?;

        let documents = paths
            .par_iter()
            .map(|path| Document::from_path(path))
            .collect::<Result<Vec<_>>>()?;

        let mut corpus = Corpus {
            root: Some(root),
            ..Default::default()
        };
        for document in documents {
            corpus.insert(document);
        }

        info!(
            "loaded {} documents from {}",
            corpus.len(),
            dir.display()
        );
        Ok(corpus)
    }

    /// Build a corpus from in-memory documents.
    pub fn from_documents<I: IntoIterator<Item = Document>>(documents: I) -> Self {
        let mut corpus = Corpus::new();
        for document in documents {
            corpus.insert(document);
        }
        corpus
    }

    /// Add a document; returns false if a document with the same path is already present.
    pub fn insert(&mut self, document: Document) -> bool {
        if !self.seen.insert(document.path.clone()) {
            debug!("skipping duplicate document {}", document.path.display());
            return false;
        }
        self.documents.push(document);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Directory the corpus was loaded from.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SpamFilterError::path_io(dir, e))?;
    let mut paths = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| SpamFilterError::path_io(dir, e))?.path();
        if path.is_file() {
            paths.push(path);
        } else {
            warn!("skipping non-file entry {}", path.display());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Expand a mix of files and directories into a flat, ordered file list.
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            paths.extend(list_files(input)?);
        } else {
            paths.push(input.to_path_buf());
        }
    }
    Ok(paths)
}
