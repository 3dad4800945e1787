//! Seam to the external per-node visitor.
//!
//! The visitor computes low-level atomic tags for a single statement; its
//! tag vocabulary is [`AtomicFeature`]. This crate only consumes the result
//! maps and never inspects how they were produced.

use crate::model::feature::{ValueFeatureMap, ValueIndex};
use crate::model::tree::{NodeId, SyntaxTree};

/// Per-statement atomic feature computation, supplied by the embedding
/// application.
///
/// Contract:
/// - `traverse` returns a *fresh* map per call;
/// - every value key appearing in a returned map must be registered in the
///   supplied [`ValueIndex`] before the call returns (the classifier treats a
///   missing entry as an invariant violation);
/// - the reserved key `""` describes the statement as a whole.
pub trait StatementVisitor {
    /// Compute the value-key -> atomic-tag map for one statement subtree.
    fn traverse(
        &mut self,
        tree: &SyntaxTree,
        node: NodeId,
        index: &mut ValueIndex,
    ) -> ValueFeatureMap;
}
