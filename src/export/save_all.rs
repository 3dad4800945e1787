//! Persist extraction artifacts into the given output directory.
//!
//! Layout:
//!   out_dir/
//!     features.jsonl
//!     summary.json
//!
//! `out_dir` is expected to be a run-specific folder (caller chooses it);
//! this module ensures it exists, writes all files, and returns a
//! [`PersistSummary`] with paths and counts.

use crate::export::jsonl;
use crate::model::feature::FeatureVector;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

/// Top-level summary returned to the caller and also written to `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PersistSummary {
    pub out_dir: String,
    pub features_jsonl: String,
    pub summary_json: String,
    /// Number of repairs extracted in this run.
    pub vectors: usize,
    /// Total features across all vectors (multiset size).
    pub features_total: usize,
    /// UTC timestamp of the run, RFC 3339.
    pub generated_at: String,
}

/// Write all artifacts to `out_dir` and return the summary.
pub fn persist_features(out_dir: &Path, vectors: &[FeatureVector]) -> Result<PersistSummary> {
    fs::create_dir_all(out_dir).with_context(|| format!("create_dir_all {}", out_dir.display()))?;
    info!("persist: dir prepared -> {}", out_dir.display());

    let p_features = out_dir.join("features.jsonl");
    let p_summary = out_dir.join("summary.json");

    jsonl::write_feature_vectors_jsonl(&p_features, vectors)?;

    let summary = PersistSummary {
        out_dir: out_dir.display().to_string(),
        features_jsonl: p_features.display().to_string(),
        summary_json: p_summary.display().to_string(),
        vectors: vectors.len(),
        features_total: vectors.iter().map(|v| v.len()).sum(),
        generated_at: Utc::now().to_rfc3339(),
    };
    let text = serde_json::to_string_pretty(&summary)?;
    fs::write(&p_summary, text).with_context(|| format!("write {}", p_summary.display()))?;

    info!(
        vectors = summary.vectors,
        features = summary.features_total,
        "persist: artifacts saved"
    );
    Ok(summary)
}
