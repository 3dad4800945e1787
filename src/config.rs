//! Configuration for the feature preparation pipeline.
//!
//! Serde-friendly so it can be loaded from YAML/JSON by the embedding
//! application; defaults are usable as-is.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// How revision-pair file names are rendered for reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// Full repo-relative path.
    Qualified,
    /// Final path segment only.
    BaseName,
}

/// Top-level configuration for feature extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// File-name rendering for revision pairs.
    pub path_style: PathStyle,
    /// Upper bound on actions per repair accepted by the pipeline.
    /// Repairs describe one localized edit; absurdly long action lists
    /// indicate a malformed generator upstream.
    pub max_actions_per_repair: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            path_style: PathStyle::Qualified,
            max_actions_per_repair: 16,
        }
    }
}

impl ExtractorConfig {
    /// Validate config sanity (no degenerate values).
    pub fn validate(&self) -> Result<()> {
        if self.max_actions_per_repair == 0 {
            return Err(anyhow!("`max_actions_per_repair` must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_action_cap_is_rejected() {
        let cfg = ExtractorConfig {
            max_actions_per_repair: 0,
            ..ExtractorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
