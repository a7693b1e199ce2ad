//! InL2 versus Okapi BM25 on the same query set.

use super::ir_eval::IrEval;
use super::runner::{DEFAULT_TOP_K, QueryRunner, RunReport};
use super::stats::{TTestResult, paired_ttest};
use crate::config::QueryRunnerConfig;
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::output::{
    BM25_SCORES_FILENAME, INL2_SCORES_FILENAME, SIGNIFICANCE_FILENAME, write_json, write_values,
};
use crate::ranker::{InL2Ranker, OkapiBm25};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Default InL2 smoothing parameter for comparisons.
pub const DEFAULT_INL2_PARAM: f64 = 5.7;

/// Options for a comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// InL2 smoothing parameter.
    pub inl2_param: f64,
    /// Results retrieved and judged per query.
    pub top_k: usize,
    /// Directory receiving the score and significance files.
    pub output_dir: PathBuf,
    /// Optional JSON summary path.
    pub summary_path: Option<PathBuf>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            inl2_param: DEFAULT_INL2_PARAM,
            top_k: DEFAULT_TOP_K,
            output_dir: PathBuf::from("."),
            summary_path: None,
        }
    }
}

/// Both runs and the test comparing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResults {
    pub inl2_param: f64,
    pub inl2: RunReport,
    pub bm25: RunReport,
    /// Paired t-test of InL2 minus BM25.
    pub significance: TTestResult,
}

impl ComparisonResults {
    /// Print summary to stdout.
    pub fn print_summary(&self) {
        println!("\n========== Ranker Comparison ==========");
        println!("Queries: {}", self.inl2.num_queries());
        println!("----------------------------------------");
        println!("InL2 (c={}) MAP: {:.4}", self.inl2_param, self.inl2.map);
        println!("BM25 MAP:         {:.4}", self.bm25.map);
        println!("----------------------------------------");
        println!("Paired t-test: {}", self.significance.format());
        println!("========================================\n");
    }
}

/// Runs the query set under InL2 then BM25 and tests the difference.
pub struct Comparison {
    config: ComparisonConfig,
}

impl Comparison {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Run both rankers, write the output files and return the results.
    ///
    /// Both runs and the t-test complete before any file is written. A single
    /// query yields a NaN p-value rather than an error.
    pub fn run(
        &self,
        index: &InvertedIndex,
        queries: &QueryRunnerConfig,
        eval: &mut IrEval,
    ) -> Result<ComparisonResults> {
        let out = &self.config.output_dir;
        let runner = QueryRunner::new(index, queries).with_top_k(self.config.top_k);

        println!("printing ranker_param: {}", self.config.inl2_param);
        let inl2 = runner.run(&InL2Ranker::new(self.config.inl2_param), eval)?;
        let bm25 = runner.run(&OkapiBm25::default(), eval)?;
        let significance = paired_ttest(&inl2.avg_precisions, &bm25.avg_precisions)?;
        println!("significance: {}", significance.p_value);

        write_values(&out.join(INL2_SCORES_FILENAME), &inl2.avg_precisions)?;
        write_values(&out.join(BM25_SCORES_FILENAME), &bm25.avg_precisions)?;
        write_values(&out.join(SIGNIFICANCE_FILENAME), &[significance.p_value])?;

        info!(
            inl2_map = inl2.map,
            bm25_map = bm25.map,
            p_value = significance.p_value,
            "Comparison finished"
        );

        let results = ComparisonResults {
            inl2_param: self.config.inl2_param,
            inl2,
            bm25,
            significance,
        };

        if let Some(path) = &self.config.summary_path {
            write_json(path, &results)?;
            info!(path = %path.display(), "Saved comparison summary");
        }

        Ok(results)
    }
}
