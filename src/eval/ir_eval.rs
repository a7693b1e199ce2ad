//! Relevance judgements and ranked-list metrics.
//!
//! Judgements are read from a whitespace-separated file with one
//! `query_id doc_id [relevance]` triple per line. A missing relevance means
//! 1; a relevance of 0 marks the document as judged non-relevant.

use crate::config::Config;
use crate::document::DocId;
use crate::error::{EvalError, Result};
use crate::ranker::SearchResult;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Identifier of a query in the judgements file.
pub type QueryId = u64;

/// Evaluates ranked lists against relevance judgements.
///
/// Every call to [`IrEval::avg_p`] is recorded; [`IrEval::map`] averages the
/// recorded values until [`IrEval::reset_stats`] clears them.
#[derive(Debug, Clone, Default)]
pub struct IrEval {
    qrels: HashMap<QueryId, HashMap<DocId, u32>>,
    scores: Vec<f64>,
}

impl IrEval {
    /// Load the judgements named by `query-judgements`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_file(config.judgements_path()?)
    }

    /// Load judgements from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
        let eval = Self::parse(&content).map_err(|(line, message)| EvalError::Judgements {
            path: path.to_path_buf(),
            line,
            message,
        })?;

        info!(
            path = %path.display(),
            queries = eval.num_queries(),
            "Loaded relevance judgements"
        );

        Ok(eval)
    }

    /// Parse judgements text; errors carry the 1-based line number.
    fn parse(content: &str) -> std::result::Result<Self, (usize, String)> {
        let mut qrels: HashMap<QueryId, HashMap<DocId, u32>> = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() > 3 || fields.len() < 2 {
                return Err((
                    line_num + 1,
                    format!("expected 2 or 3 fields, found {}", fields.len()),
                ));
            }

            let parse = |field: &str, what: &str| {
                field
                    .parse::<u64>()
                    .map_err(|e| (line_num + 1, format!("bad {} '{}': {}", what, field, e)))
            };

            let query_id = parse(fields[0], "query id")?;
            let doc_id = parse(fields[1], "document id")?;
            let relevance = match fields.get(2) {
                Some(field) => field.parse::<u32>().map_err(|e| {
                    (line_num + 1, format!("bad relevance '{}': {}", field, e))
                })?,
                None => 1,
            };

            qrels.entry(query_id).or_default().insert(doc_id, relevance);
        }

        Ok(Self {
            qrels,
            scores: Vec::new(),
        })
    }

    /// Number of queries with at least one judgement.
    pub fn num_queries(&self) -> usize {
        self.qrels.len()
    }

    /// Number of documents judged relevant for a query.
    pub fn num_relevant(&self, query_id: QueryId) -> usize {
        self.qrels
            .get(&query_id)
            .map(|docs| docs.values().filter(|&&rel| rel > 0).count())
            .unwrap_or(0)
    }

    fn is_relevant(&self, query_id: QueryId, doc_id: DocId) -> bool {
        self.qrels
            .get(&query_id)
            .and_then(|docs| docs.get(&doc_id))
            .is_some_and(|&rel| rel > 0)
    }

    /// Average precision of the first `num_docs` results, recorded for MAP.
    ///
    /// The sum of precisions at each relevant hit is divided by the smaller
    /// of `num_docs` and the number of relevant documents, so a perfect
    /// top-`num_docs` list scores 1 even when more documents are relevant.
    /// Queries without relevant documents score 0.
    pub fn avg_p(&mut self, results: &[SearchResult], query_id: QueryId, num_docs: usize) -> f64 {
        let denominator = num_docs.min(self.num_relevant(query_id));

        let avg_p = if denominator == 0 {
            0.0
        } else {
            let mut precision_sum = 0.0;
            let mut relevant_found = 0;

            for (i, result) in results.iter().take(num_docs).enumerate() {
                if self.is_relevant(query_id, result.doc_id) {
                    relevant_found += 1;
                    precision_sum += relevant_found as f64 / (i + 1) as f64;
                }
            }

            precision_sum / denominator as f64
        };

        self.scores.push(avg_p);
        avg_p
    }

    /// Mean of the recorded average precisions; 0 when none are recorded.
    pub fn map(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }

    /// Recorded average precisions, in call order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Forget recorded average precisions.
    pub fn reset_stats(&mut self) {
        self.scores.clear();
    }
}
