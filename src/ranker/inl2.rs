//! InL2: inverse document frequency with Laplace after-effect and
//! length normalization 2, from the divergence-from-randomness family.

use super::{RankingFunction, ScoreData};

/// InL2 ranking function with term-frequency smoothing parameter `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InL2Ranker {
    pub param: f64,
}

impl InL2Ranker {
    pub fn new(param: f64) -> Self {
        Self { param }
    }
}

impl Default for InL2Ranker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RankingFunction for InL2Ranker {
    fn name(&self) -> &str {
        "inl2"
    }

    /// Requires `doc_size > 0` and `corpus_term_count > -0.5`.
    fn score_one(&self, sd: &ScoreData) -> f64 {
        let normalized_doc_length = 1.0 + sd.avg_dl / sd.doc_size;
        let tfn = sd.doc_term_count * normalized_doc_length.log2();
        let first_half = sd.query_term_weight * (tfn / (tfn + self.param));
        let second_half = ((sd.num_docs + 1.0) / (sd.corpus_term_count + 0.5)).log2();
        first_half * second_half
    }
}
