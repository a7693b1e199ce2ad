//! Documents and the line corpus they are loaded from.
//!
//! A line corpus stores one document per line; the document id is the
//! 0-based line number. Blank lines are kept as empty documents so that ids
//! stay aligned with the relevance judgements.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifier of a document in the corpus.
pub type DocId = u64;

/// A single document, also used to carry query text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Position of the document in its corpus.
    pub id: DocId,
    /// Raw text content.
    content: String,
}

impl Document {
    /// Create a new document.
    pub fn new(id: DocId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    /// Replace the text content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Text content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A collection of documents loaded from a line corpus file.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Original file path (if loaded from file).
    pub path: Option<PathBuf>,
    documents: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from in-memory text, one entry per document.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document::new(i as DocId, text))
            .collect();

        Self {
            path: None,
            documents,
        }
    }

    /// Load a line corpus.
    pub fn from_line_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

        let mut corpus = Self::from_texts(content.lines());
        if corpus.is_empty() {
            return Err(EvalError::EmptyCorpus(path.to_path_buf()));
        }
        corpus.path = Some(path.to_path_buf());

        Ok(corpus)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get a document by id.
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id as usize)
    }

    /// Iterate over all documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }
}
