//! Error types for the ranking evaluator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while building the index or running an evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required table is absent from the configuration file.
    #[error("{section} table needed in {}", .path.display())]
    MissingSection { section: String, path: PathBuf },

    /// A relevance judgements line could not be parsed.
    #[error("Invalid judgement in '{}' at line {line}: {message}", .path.display())]
    Judgements {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// No documents found in the corpus.
    #[error("No documents found in corpus at '{0}'")]
    EmptyCorpus(PathBuf),

    /// The significance test could not be computed.
    #[error("Significance test failed: {0}")]
    Significance(String),

    /// Error during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EvalError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EvalError {
    fn from(err: toml::de::Error) -> Self {
        EvalError::Config(format!("Failed to parse config file: {}", err))
    }
}
