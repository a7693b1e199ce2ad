//! Rank Eval CLI
//!
//! Compares the InL2 ranking function against Okapi BM25 on a query set.
//!
//! Usage:
//!   rank-eval config.toml [ranker_param]
//!
//! Options:
//!   --top-k <N>              # Results judged per query (default: 10)
//!   --output-dir <DIR>       # Where the score files go (default: .)
//!   --summary <path>         # Save both runs and the t-test as JSON
//!   --verbose                # Log index and judgement details

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use rust_rank_eval::{
    config::Config,
    eval::{Comparison, ComparisonConfig, DEFAULT_INL2_PARAM, DEFAULT_TOP_K, IrEval},
    index::make_inverted_index,
};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Evaluate InL2 against Okapi BM25 with average precision and a paired t-test
#[derive(Parser)]
#[command(name = "rank-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    config: Option<PathBuf>,

    /// InL2 smoothing parameter (non-numeric values fall back to 5.7)
    #[arg(allow_negative_numbers = true)]
    ranker_param: Option<String>,

    /// Number of results retrieved and judged per query
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Directory receiving the score and significance files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Save both runs and the t-test result to a JSON file
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(config_path) = cli.config else {
        eprintln!("Usage: rank-eval config.toml [ranker_param]");
        process::exit(1);
    };

    let config = Config::load_from_file(&config_path).context("Failed to load configuration")?;

    let queries = match config.query_runner() {
        Ok(queries) => queries.clone(),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let inl2_param = parse_ranker_param(cli.ranker_param.as_deref());

    println!("Building or loading index...");
    let index = make_inverted_index(&config).context("Failed to build index")?;
    let mut eval = IrEval::from_config(&config).context("Failed to load relevance judgements")?;

    let comparison = Comparison::new(ComparisonConfig {
        inl2_param,
        top_k: cli.top_k,
        output_dir: cli.output_dir,
        summary_path: cli.summary,
    });

    let results = comparison
        .run(&index, &queries, &mut eval)
        .context("Comparison failed")?;

    results.print_summary();

    Ok(())
}

/// Parse the InL2 parameter, falling back to the default when absent or invalid.
fn parse_ranker_param(arg: Option<&str>) -> f64 {
    match arg {
        None => DEFAULT_INL2_PARAM,
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!(
                    value = raw,
                    default = DEFAULT_INL2_PARAM,
                    "Invalid ranker parameter, using default"
                );
                DEFAULT_INL2_PARAM
            }
        },
    }
}
