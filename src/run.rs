//! High-level orchestration for extracting one repair's feature vector.
//!
//! This module contains the single public entry point
//! [`prepare_repair_features`]. It validates the repair against the
//! configuration, allocates the per-call value index, and runs the joint
//! feature composer. Batch callers loop over repairs and hand each result to
//! [`crate::export::save_all::persist_features`].

use crate::{
    config::ExtractorConfig,
    errors::{FeatureError, FeatureResult},
    extract::{compose, visitor::StatementVisitor},
    model::{
        feature::{FeatureVector, ValueIndex},
        repair::Repair,
        tree::{NodeId, SyntaxTree},
    },
};
use tracing::debug;

/// Extract the feature vector for one repair anchored at `anchor`.
///
/// A fresh [`ValueIndex`] is created per call, so concurrent extractions of
/// different repairs never share resolution state.
pub fn prepare_repair_features<V: StatementVisitor>(
    config: &ExtractorConfig,
    tree: &SyntaxTree,
    repair: &Repair,
    anchor: NodeId,
    visitor: &mut V,
) -> FeatureResult<FeatureVector> {
    config
        .validate()
        .map_err(|e| FeatureError::Malformed(e.to_string()))?;
    if repair.actions.len() > config.max_actions_per_repair {
        return Err(FeatureError::Malformed(format!(
            "repair has {} actions, cap is {}",
            repair.actions.len(),
            config.max_actions_per_repair
        )));
    }

    let mut index = ValueIndex::new();
    let features = compose::extract_features(tree, repair, anchor, visitor, &mut index)?;
    debug!(
        actions = repair.actions.len(),
        resolved_values = index.len(),
        features = features.len(),
        "repair featurized"
    );
    Ok(features)
}
