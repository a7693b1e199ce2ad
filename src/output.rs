//! Writing evaluation results to disk.
//!
//! Score lists are plain text with one value per line; the optional run
//! summary is pretty-printed JSON.

use crate::error::{EvalError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Average precision series of the InL2 run.
pub const INL2_SCORES_FILENAME: &str = "inl2.avg_p.txt";
/// Average precision series of the BM25 run.
pub const BM25_SCORES_FILENAME: &str = "bm25.avg_p.txt";
/// p-value of the paired t-test.
pub const SIGNIFICANCE_FILENAME: &str = "significance.txt";

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| EvalError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Write one value per line.
pub fn write_values(path: &Path, values: &[f64]) -> Result<()> {
    ensure_parent(path)?;

    let data: String = values.iter().map(|v| format!("{}\n", v)).collect();

    fs::write(path, data).map_err(|e| EvalError::io(path, e))
}

/// Read back a file written by [`write_values`].
pub fn read_values(path: &Path) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            l.trim().parse::<f64>().map_err(|e| {
                EvalError::Serialization(format!("bad value '{}' in {}: {}", l, path.display(), e))
            })
        })
        .collect()
}

/// Save a serializable summary as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| EvalError::io(path, e))
}
