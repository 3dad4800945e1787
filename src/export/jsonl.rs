//! JSONL writer for extracted feature vectors.
//!
//! One compact JSON object per line, grep-friendly and streamable into the
//! training pipeline. The format is stable across runs; avoid breaking
//! changes unless versioned explicitly.

use crate::model::feature::FeatureVector;
use anyhow::{Context, Result};
use serde_json::json;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// Write feature vectors as JSON Lines.
///
/// Each line carries the ordinal id of the repair within this run, the
/// feature count, and the features themselves:
/// ```json
/// { "repair": 0, "count": 12, "features": [ ... ] }
/// ```
pub fn write_feature_vectors_jsonl(path: &Path, vectors: &[FeatureVector]) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);

    for (i, v) in vectors.iter().enumerate() {
        let rec = json!({
            "repair": i,
            "count": v.len(),
            "features": v,
        });
        serde_json::to_writer(&mut w, &rec)?;
        w.write_all(b"\n")?;
    }

    w.flush()?;
    info!(
        vectors = vectors.len(),
        "jsonl: wrote feature vectors -> {}",
        path.display()
    );
    Ok(())
}
