//! Ranking functions and ranked retrieval.
//!
//! A ranking function only has to score a single query term against a single
//! document ([`RankingFunction::score_one`]). The provided
//! [`RankingFunction::score`] method walks the postings of every query term,
//! sums the per-term contributions per document and returns the top `k`.

mod bm25;
mod inl2;

pub use bm25::OkapiBm25;
pub use inl2::InL2Ranker;

use crate::document::{DocId, Document};
use crate::index::InvertedIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Statistics for one query term against one candidate document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreData {
    /// Candidate document.
    pub doc_id: DocId,
    /// Length of the candidate document in tokens.
    pub doc_size: f64,
    /// Average document length in the corpus.
    pub avg_dl: f64,
    /// Occurrences of the term in the candidate document.
    pub doc_term_count: f64,
    /// Number of documents containing the term.
    pub doc_count: f64,
    /// Occurrences of the term across the corpus.
    pub corpus_term_count: f64,
    /// Number of documents in the corpus.
    pub num_docs: f64,
    /// Number of tokens in the corpus.
    pub total_terms: f64,
    /// Weight of the term in the query.
    pub query_term_weight: f64,
}

/// A scored document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: DocId,
    pub score: f64,
}

/// A term-at-a-time ranking function.
pub trait RankingFunction {
    /// Short name used in reports.
    fn name(&self) -> &str;

    /// Score contribution of one query term for one document.
    fn score_one(&self, sd: &ScoreData) -> f64;

    /// Return the `k` highest scoring documents for `query`.
    ///
    /// Only documents containing at least one query term are candidates.
    /// Results are sorted by descending score, ties by ascending doc id.
    fn score(&self, index: &InvertedIndex, query: &Document, k: usize) -> Vec<SearchResult> {
        if k == 0 {
            return Vec::new();
        }

        let num_docs = index.num_docs() as f64;
        let avg_dl = index.avg_doc_length();
        let total_terms = index.total_corpus_terms() as f64;

        let mut accumulators: HashMap<DocId, f64> = HashMap::new();

        for (term, weight) in index.analyzer().term_counts(query.content()) {
            let Some(term_id) = index.term_id(&term) else {
                debug!(term = %term, "Query term not in index");
                continue;
            };

            let doc_count = index.doc_freq(term_id) as f64;
            let corpus_term_count = index.total_num_occurrences(term_id) as f64;

            for posting in index.postings(term_id) {
                let sd = ScoreData {
                    doc_id: posting.doc_id,
                    doc_size: index.doc_size(posting.doc_id) as f64,
                    avg_dl,
                    doc_term_count: posting.count as f64,
                    doc_count,
                    corpus_term_count,
                    num_docs,
                    total_terms,
                    query_term_weight: weight as f64,
                };
                *accumulators.entry(posting.doc_id).or_insert(0.0) += self.score_one(&sd);
            }
        }

        let mut results: Vec<SearchResult> = accumulators
            .into_iter()
            .map(|(doc_id, score)| SearchResult { doc_id, score })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.doc_id.cmp(&b.doc_id))
        });
        results.truncate(k);

        results
    }
}
