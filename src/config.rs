//! Configuration for the ranking evaluator.
//!
//! The configuration is a TOML file naming the corpus, the relevance
//! judgements and the `[query-runner]` table. Relative paths are resolved
//! against the working directory.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the table holding the query runner settings.
pub const QUERY_RUNNER_SECTION: &str = "query-runner";

/// Settings for iterating a query file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct QueryRunnerConfig {
    /// File with one query per line.
    #[serde(default = "default_query_path")]
    pub query_path: PathBuf,

    /// Judgement id of the first query line.
    #[serde(default)]
    pub query_id_start: u64,
}

fn default_query_path() -> PathBuf {
    PathBuf::from("queries.txt")
}

impl Default for QueryRunnerConfig {
    fn default() -> Self {
        Self {
            query_path: default_query_path(),
            query_id_start: 0,
        }
    }
}

/// Full evaluation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Data root directory.
    #[serde(default)]
    pub prefix: Option<PathBuf>,

    /// Dataset name; the line corpus lives at `{prefix}/{dataset}/{dataset}.dat`.
    #[serde(default)]
    pub dataset: Option<String>,

    /// Explicit corpus file, overriding `prefix`/`dataset`.
    #[serde(default)]
    pub corpus_file: Option<PathBuf>,

    /// Relevance judgements file (`query_id doc_id [relevance]` per line).
    #[serde(default)]
    pub query_judgements: Option<PathBuf>,

    /// Optional stop-word list, one word per line.
    #[serde(default)]
    pub stop_words: Option<PathBuf>,

    /// Query runner table.
    #[serde(default)]
    pub query_runner: Option<QueryRunnerConfig>,

    /// Where the configuration was read from.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Config {
    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = path.to_path_buf();
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The `[query-runner]` table, which every evaluation run requires.
    pub fn query_runner(&self) -> Result<&QueryRunnerConfig> {
        self.query_runner
            .as_ref()
            .ok_or_else(|| EvalError::MissingSection {
                section: QUERY_RUNNER_SECTION.to_string(),
                path: self.source.clone(),
            })
    }

    /// Path of the line corpus.
    pub fn corpus_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.corpus_file {
            return Ok(path.clone());
        }

        let dataset = self.dataset.as_deref().ok_or_else(|| {
            EvalError::Config("either corpus-file or dataset is required".to_string())
        })?;
        let prefix = self.prefix.clone().unwrap_or_else(|| PathBuf::from("."));

        Ok(prefix.join(dataset).join(format!("{}.dat", dataset)))
    }

    /// Path of the relevance judgements.
    pub fn judgements_path(&self) -> Result<&Path> {
        self.query_judgements
            .as_deref()
            .ok_or_else(|| EvalError::Config("query-judgements is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_query_runner_defaults() {
        let config = Config::from_toml_str("[query-runner]\n").unwrap();
        let runner = config.query_runner().unwrap();
        assert_eq!(runner.query_path, PathBuf::from("queries.txt"));
        assert_eq!(runner.query_id_start, 0);
    }

    #[test]
    fn test_query_runner_values() {
        let config = Config::from_toml_str(
            r#"
query-judgements = "qrels.txt"

[query-runner]
query-path = "cranfield-queries.txt"
query-id-start = 1
"#,
        )
        .unwrap();

        let runner = config.query_runner().unwrap();
        assert_eq!(runner.query_path, PathBuf::from("cranfield-queries.txt"));
        assert_eq!(runner.query_id_start, 1);
        assert_eq!(config.judgements_path().unwrap(), Path::new("qrels.txt"));
    }

    #[test]
    fn test_missing_query_runner_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dataset = \"tiny\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        let err = config.query_runner().unwrap_err();
        assert!(matches!(err, EvalError::MissingSection { .. }));
        assert!(err.to_string().starts_with("query-runner table needed in"));
    }

    #[test]
    fn test_corpus_path_from_dataset() {
        let config = Config::from_toml_str("prefix = \"data\"\ndataset = \"tiny\"\n").unwrap();
        assert_eq!(
            config.corpus_path().unwrap(),
            PathBuf::from("data").join("tiny").join("tiny.dat")
        );
    }

    #[test]
    fn test_corpus_file_overrides_dataset() {
        let config =
            Config::from_toml_str("dataset = \"tiny\"\ncorpus-file = \"docs.txt\"\n").unwrap();
        assert_eq!(config.corpus_path().unwrap(), PathBuf::from("docs.txt"));
    }

    #[test]
    fn test_missing_corpus_is_error() {
        let config = Config::default();
        assert!(config.corpus_path().is_err());
        assert!(config.judgements_path().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("query-runner = [").unwrap_err();
        assert!(matches!(err, EvalError::Config(_)));
    }
}
