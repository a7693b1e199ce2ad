//! Runs every query of a query file through one ranker.

use super::ir_eval::IrEval;
use crate::config::QueryRunnerConfig;
use crate::document::Document;
use crate::error::{EvalError, Result};
use crate::index::InvertedIndex;
use crate::ranker::RankingFunction;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Number of results retrieved and judged per query.
pub const DEFAULT_TOP_K: usize = 10;

/// Outcome of one pass over the query file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Ranker name.
    pub ranker: String,
    /// Average precision per query, in query file order.
    pub avg_precisions: Vec<f64>,
    /// Mean average precision over this run.
    pub map: f64,
    /// Wall time of the run (seconds).
    pub elapsed_secs: f64,
}

impl RunReport {
    pub fn num_queries(&self) -> usize {
        self.avg_precisions.len()
    }
}

/// Iterates a query file against a fixed index.
pub struct QueryRunner<'a> {
    index: &'a InvertedIndex,
    config: &'a QueryRunnerConfig,
    top_k: usize,
}

impl<'a> QueryRunner<'a> {
    pub fn new(index: &'a InvertedIndex, config: &'a QueryRunnerConfig) -> Self {
        Self {
            index,
            config,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve and judge every query line with `ranker`.
    ///
    /// Line `n` (0-based) is judged as query `query-id-start + n`. The
    /// evaluator's recorded scores are reset first, so the reported MAP
    /// covers only this run.
    pub fn run(&self, ranker: &dyn RankingFunction, eval: &mut IrEval) -> Result<RunReport> {
        let start = Instant::now();
        let path = &self.config.query_path;
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

        eval.reset_stats();
        let mut query = Document::default();
        let mut avg_precisions = Vec::new();

        println!("Running queries ({})", ranker.name());

        for (query_num, line) in content.lines().enumerate() {
            query.set_content(line.trim());
            let results = ranker.score(self.index, &query, self.top_k);

            let query_id = self.config.query_id_start + query_num as u64;
            let avg_p = eval.avg_p(&results, query_id, self.top_k);

            println!("Query {} average precision: {}", query_num + 1, avg_p);
            avg_precisions.push(avg_p);
        }

        let map = eval.map();
        let elapsed_secs = start.elapsed().as_secs_f64();

        println!("Mean average precision: {}", map);
        println!("Elapsed: {} seconds", round4(elapsed_secs));

        Ok(RunReport {
            ranker: ranker.name().to_string(),
            avg_precisions,
            map,
            elapsed_secs,
        })
    }
}

/// Round to four decimal places, keeping `Display` free of trailing zeros.
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::document::Corpus;
    use crate::ranker::{InL2Ranker, OkapiBm25};
    use tempfile::TempDir;

    fn index() -> InvertedIndex {
        let corpus = Corpus::from_texts([
            "supersonic flow over a wing",
            "heat transfer in boundary layers",
            "boundary layer flow separation",
            "wing flutter at supersonic speed",
        ]);
        InvertedIndex::build(&corpus, Analyzer::new())
    }

    fn write_queries(dir: &TempDir, queries: &str) -> QueryRunnerConfig {
        let path = dir.path().join("queries.txt");
        std::fs::write(&path, queries).unwrap();
        QueryRunnerConfig {
            query_path: path,
            query_id_start: 1,
        }
    }

    #[test]
    fn test_run_collects_one_value_per_line() {
        let dir = TempDir::new().unwrap();
        let config = write_queries(&dir, "supersonic wing\nheat transfer\n\n");
        let mut eval = IrEval::default();
        let index = index();

        let report = QueryRunner::new(&index, &config)
            .run(&InL2Ranker::new(5.7), &mut eval)
            .unwrap();

        assert_eq!(report.ranker, "inl2");
        assert_eq!(report.num_queries(), 3);
        assert!(report.avg_precisions.iter().all(|&ap| ap == 0.0));
    }

    #[test]
    fn test_map_is_mean_of_series() {
        let dir = TempDir::new().unwrap();
        let config = write_queries(&dir, "supersonic wing\nheat transfer\nboundary layer\n");
        let qrels = dir.path().join("qrels.txt");
        // ids start at 1
        std::fs::write(&qrels, "1 3\n1 0\n2 1\n3 2\n3 1 1\n").unwrap();
        let mut eval = IrEval::from_file(&qrels).unwrap();
        let index = index();
        let runner = QueryRunner::new(&index, &config);

        for ranker in [&InL2Ranker::new(5.7) as &dyn RankingFunction, &OkapiBm25::default()] {
            let report = runner.run(ranker, &mut eval).unwrap();
            let mean = report.avg_precisions.iter().sum::<f64>() / 3.0;

            assert_eq!(report.num_queries(), 3);
            assert!((report.map - mean).abs() < 1e-12);
            assert!(report.avg_precisions[1] > 0.99);
        }
    }

    #[test]
    fn test_top_k_limits_judged_results() {
        let dir = TempDir::new().unwrap();
        let config = write_queries(&dir, "flow\n");
        let qrels = dir.path().join("qrels.txt");
        std::fs::write(&qrels, "1 0\n1 2\n").unwrap();
        let mut eval = IrEval::from_file(&qrels).unwrap();
        let index = index();

        let report = QueryRunner::new(&index, &config)
            .with_top_k(1)
            .run(&OkapiBm25::default(), &mut eval)
            .unwrap();

        // one of the two relevant documents fills the single slot
        assert!((report.map - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_query_file() {
        let config = QueryRunnerConfig {
            query_path: "/nonexistent/queries.txt".into(),
            query_id_start: 0,
        };
        let mut eval = IrEval::default();
        let index = index();

        let result = QueryRunner::new(&index, &config).run(&OkapiBm25::default(), &mut eval);
        assert!(matches!(result, Err(EvalError::Io { .. })));
    }

    #[test]
    fn test_elapsed_rounding() {
        assert_eq!(format!("{}", round4(0.012)), "0.012");
        assert_eq!(format!("{}", round4(0.01204)), "0.012");
        assert_eq!(format!("{}", round4(1.23456)), "1.2346");
        assert_eq!(format!("{}", round4(0.0)), "0");
    }
}
