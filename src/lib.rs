//! Sparse feature preparation for candidate program repairs.
//!
//! Turns one already-generated repair plus its surrounding syntactic context
//! into the sparse categorical feature vector consumed by a statistical
//! patch-ranking model. The pipeline classifies the repair's edit kind,
//! selects bounded statement windows around the edit, asks an external
//! visitor for per-statement atomic tags, classifies the value-expressions it
//! finds, and composes four cross-product feature families.
//!
//! Parsing, dataflow analysis, and model training live elsewhere; the syntax
//! tree and the atomic-tag visitor arrive through the seams in
//! [`model::tree`] and [`extract::visitor`].

pub mod config;
pub mod errors;
pub mod export;
pub mod extract;
pub mod model;
pub mod run;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ExtractorConfig, PathStyle};
pub use errors::{FeatureError, FeatureResult, InvariantError};
pub use run::prepare_repair_features;
