//! Evaluation of ranking functions against relevance judgements.
//!
//! This module provides:
//! - Relevance judgement loading with average precision and MAP
//! - A query runner producing one average precision per query
//! - A paired t-test for comparing two rankers
//! - The InL2 versus BM25 comparison that ties them together

pub mod comparison;
pub mod ir_eval;
pub mod runner;
pub mod stats;

pub use comparison::{Comparison, ComparisonConfig, ComparisonResults, DEFAULT_INL2_PARAM};
pub use ir_eval::{IrEval, QueryId};
pub use runner::{DEFAULT_TOP_K, QueryRunner, RunReport};
pub use stats::{TTestResult, paired_ttest};
