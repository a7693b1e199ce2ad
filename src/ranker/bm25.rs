//! Okapi BM25, the baseline ranker.

use super::{RankingFunction, ScoreData};

/// Okapi BM25 with document (`k1`, `b`) and query (`k3`) saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkapiBm25 {
    pub k1: f64,
    pub b: f64,
    pub k3: f64,
}

impl OkapiBm25 {
    pub const DEFAULT_K1: f64 = 1.2;
    pub const DEFAULT_B: f64 = 0.75;
    pub const DEFAULT_K3: f64 = 500.0;

    pub fn new(k1: f64, b: f64, k3: f64) -> Self {
        Self { k1, b, k3 }
    }
}

impl Default for OkapiBm25 {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K1, Self::DEFAULT_B, Self::DEFAULT_K3)
    }
}

impl RankingFunction for OkapiBm25 {
    fn name(&self) -> &str {
        "bm25"
    }

    fn score_one(&self, sd: &ScoreData) -> f64 {
        // +1 inside the log keeps the idf positive for very common terms
        let idf = (1.0 + (sd.num_docs - sd.doc_count + 0.5) / (sd.doc_count + 0.5)).ln();

        let tf = ((self.k1 + 1.0) * sd.doc_term_count)
            / (self.k1 * ((1.0 - self.b) + self.b * sd.doc_size / sd.avg_dl)
                + sd.doc_term_count);

        let qtf = ((self.k3 + 1.0) * sd.query_term_weight) / (self.k3 + sd.query_term_weight);

        tf * idf * qtf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_data() -> ScoreData {
        ScoreData {
            doc_id: 0,
            doc_size: 10.0,
            avg_dl: 10.0,
            doc_term_count: 1.0,
            doc_count: 1.0,
            corpus_term_count: 1.0,
            num_docs: 2.0,
            total_terms: 20.0,
            query_term_weight: 1.0,
        }
    }

    #[test]
    fn test_known_value() {
        // idf = ln(1 + 1.5/1.5) = ln 2; tf = 2.2/(1.2 + 1) = 1; qtf = 1
        let score = OkapiBm25::default().score_one(&score_data());
        assert!((score - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_common_term_still_positive() {
        let sd = ScoreData {
            doc_count: 2.0,
            ..score_data()
        };
        assert!(OkapiBm25::default().score_one(&sd) > 0.0);
    }

    #[test]
    fn test_tf_saturates() {
        let bm25 = OkapiBm25::default();
        let at = |tf: f64| {
            bm25.score_one(&ScoreData {
                doc_term_count: tf,
                ..score_data()
            })
        };
        assert!(at(2.0) > at(1.0));
        assert!(at(100.0) - at(50.0) < at(2.0) - at(1.0));
        assert!(at(1e9) < (bm25.k1 + 1.0) * 2.0_f64.ln() + 1e-9);
    }

    #[test]
    fn test_longer_document_penalized() {
        let bm25 = OkapiBm25::default();
        let short = bm25.score_one(&score_data());
        let long = bm25.score_one(&ScoreData {
            doc_size: 40.0,
            ..score_data()
        });
        assert!(short > long);
    }
}
