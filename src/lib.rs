//! Rust Rank Eval - compare ranking functions with average precision.
//!
//! The crate builds an in-memory inverted index over a line corpus, ranks a
//! query set with a pluggable [`RankingFunction`], judges each ranked list
//! against relevance judgements and compares two rankers with a paired
//! t-test.
//!
//! # Quick Start
//!
//! ```no_run
//! use rust_rank_eval::{
//!     config::Config,
//!     eval::{IrEval, QueryRunner},
//!     index::make_inverted_index,
//!     ranker::{InL2Ranker, OkapiBm25},
//! };
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_from_file(Path::new("config.toml"))?;
//!     let queries = config.query_runner()?;
//!
//!     let index = make_inverted_index(&config)?;
//!     let mut eval = IrEval::from_config(&config)?;
//!
//!     let runner = QueryRunner::new(&index, queries);
//!     let inl2 = runner.run(&InL2Ranker::new(5.7), &mut eval)?;
//!     let bm25 = runner.run(&OkapiBm25::default(), &mut eval)?;
//!
//!     println!("InL2 MAP {:.4}, BM25 MAP {:.4}", inl2.map, bm25.map);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Analyzer**: lowercase alphanumeric tokens, optional stop words
//! - **InvertedIndex**: postings plus the corpus statistics rankers need
//! - **RankingFunction**: per-term scoring (`InL2Ranker`, `OkapiBm25`) and top-k retrieval
//! - **IrEval**: relevance judgements, average precision, MAP
//! - **Comparison**: InL2 vs BM25 runs, paired t-test, output files

pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod eval;
pub mod index;
pub mod output;
pub mod ranker;

// Re-export commonly used types
pub use config::{Config, QueryRunnerConfig};
pub use document::{Corpus, DocId, Document};
pub use error::{EvalError, Result};
pub use eval::{Comparison, ComparisonConfig, IrEval, QueryRunner, RunReport};
pub use index::{InvertedIndex, make_inverted_index};
pub use ranker::{InL2Ranker, OkapiBm25, RankingFunction, ScoreData, SearchResult};
