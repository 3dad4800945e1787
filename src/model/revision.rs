//! File-at-two-revisions record consumed by repair generation.
//!
//! Pairs the previous/next version of one file inside an owning commit. This
//! record is bookkeeping input for the upstream differ; the feature algorithm
//! itself never reads it, so it stays a plain data carrier.

use crate::config::PathStyle;
use serde::{Deserialize, Serialize};

/// One file observed at two revisions of the same repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionPair {
    /// Identifier of the owning commit.
    pub commit: String,
    /// Repo-relative path of the file before the commit.
    pub previous_path: String,
    /// Repo-relative path of the file after the commit.
    pub next_path: String,
    /// Revision identifier of the previous version.
    pub previous_revision: String,
    /// Revision identifier of the next version.
    pub next_revision: String,
    /// Name of the parent commit, when known.
    #[serde(default)]
    pub previous_commit: Option<String>,
}

impl RevisionPair {
    /// Display name of the file, honoring the configured path style.
    ///
    /// `Qualified` keeps the full repo-relative path; `BaseName` keeps only
    /// the final path segment.
    pub fn file_name(&self, style: PathStyle) -> &str {
        match style {
            PathStyle::Qualified => &self.next_path,
            PathStyle::BaseName => self
                .next_path
                .rsplit('/')
                .next()
                .unwrap_or(&self.next_path),
        }
    }

    /// Display name of the previous version under the same rules.
    pub fn previous_file_name(&self, style: PathStyle) -> &str {
        match style {
            PathStyle::Qualified => &self.previous_path,
            PathStyle::BaseName => self
                .previous_path
                .rsplit('/')
                .next()
                .unwrap_or(&self.previous_path),
        }
    }
}
