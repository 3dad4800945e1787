//! Joint feature composition: the four feature families for one repair.
//!
//! Families, in emission order:
//! 1. repair-only — which broad edit family the repair belongs to;
//! 2. position/atomic/repair — whole-statement shapes near the edit, per
//!    window position, jointly with the edit family;
//! 3. position/atomic/atomic — per-value shape in a neighboring window
//!    crossed with its shape in the current window;
//! 4. atomic/value — per-value shape crossed with the value's role.
//!
//! The output is an ordered multiset; duplicates are preserved since the
//! downstream model may weight by count.

use crate::errors::{FeatureError, FeatureResult};
use crate::extract::aggregate::aggregate_statements;
use crate::extract::value::classify;
use crate::extract::visitor::StatementVisitor;
use crate::extract::window::{immediate_follow_statements, local_window_statements};
use crate::model::feature::{
    Feature, FeatureVector, Position, RepairFeature, ValueIndex, WHOLE_STATEMENT_KEY,
};
use crate::model::repair::{Repair, RepairActionKind};
use crate::model::tree::{LiteralValue, NodeId, NodeKind, SyntaxTree};
use tracing::debug;

/// Broad edit families for a repair kind. Kinds outside the table (and
/// unclassified repairs) yield no repair feature at all.
pub fn repair_features(kind: Option<RepairActionKind>) -> Vec<RepairFeature> {
    use RepairActionKind::*;
    match kind {
        Some(InsertControlExit) => vec![RepairFeature::InsertControl],
        Some(Guard) | Some(SpecialGuard) => vec![RepairFeature::InsertGuard],
        Some(AddInitializer) | Some(AddAndReplace) => vec![RepairFeature::InsertStatement],
        Some(TightenCondition) | Some(LoosenCondition) => vec![RepairFeature::ReplaceCondition],
        Some(Replace) | Some(ReplaceStringLiteral) => vec![RepairFeature::ReplaceStatement],
        Some(ReplaceMutation) | None => vec![],
    }
}

/// Compose the full feature vector for one repair anchored at `anchor`.
///
/// `index` must be a fresh [`ValueIndex`] owned by this extraction call; it
/// is filled by the visitor while the context maps are built and then used
/// for value resolution.
pub fn extract_features<V: StatementVisitor>(
    tree: &SyntaxTree,
    repair: &Repair,
    anchor: NodeId,
    visitor: &mut V,
    index: &mut ValueIndex,
) -> FeatureResult<FeatureVector> {
    if repair.actions.is_empty() {
        return Err(FeatureError::Malformed(
            "repair has no actions; the first action must anchor the context".into(),
        ));
    }
    let mut out = FeatureVector::new();

    // 1. Repair-only features.
    let repair_tags = repair_features(repair.kind);
    for tag in &repair_tags {
        out.push(Feature::RepairOnly(*tag));
    }

    // 2. Context maps: current = anchor traversal + immediate-follow group;
    //    previous/next from the bounded local window.
    let mut current = visitor.traverse(tree, anchor, index);
    let follow = immediate_follow_statements(tree, repair);
    current.union_with(&aggregate_statements(visitor, tree, &follow, index));
    let (before, after) = local_window_statements(tree, repair)?;
    let mut previous = aggregate_statements(visitor, tree, &before, index);
    let mut next = aggregate_statements(visitor, tree, &after, index);

    // 3. Whole-statement shapes per position, jointly with the edit family.
    for tag in &repair_tags {
        for (position, map) in [
            (Position::Current, &current),
            (Position::Previous, &previous),
            (Position::Next, &next),
        ] {
            if let Some(atomics) = map.get(WHOLE_STATEMENT_KEY) {
                for atomic in atomics {
                    out.push(Feature::PositionAtomicRepair(position, *atomic, *tag));
                }
            }
        }
    }
    // The whole-statement entries are consumed; the remaining families work
    // on named value keys only.
    current.remove(WHOLE_STATEMENT_KEY);
    previous.remove(WHOLE_STATEMENT_KEY);
    next.remove(WHOLE_STATEMENT_KEY);

    // 4. Variable-cross family. Integer literals carry no cross-window
    //    signal, so their keys are skipped.
    for (key, current_tags) in current.iter() {
        if let Some(node) = index.get(key)
            && matches!(tree.kind(node), NodeKind::Literal(LiteralValue::Int(_)))
        {
            continue;
        }
        for (position, other) in [(Position::Previous, &previous), (Position::Next, &next)] {
            if let Some(other_tags) = other.get(key) {
                for current_tag in current_tags {
                    for other_tag in other_tags {
                        out.push(Feature::PositionAtomicAtomic(
                            position,
                            *other_tag,
                            *current_tag,
                        ));
                    }
                }
            }
        }
    }

    // 5. Value-cross family.
    for (key, atomics) in current.iter() {
        let value_tags = classify(key, tree, repair, index)?;
        for atomic in atomics {
            for value_tag in &value_tags {
                out.push(Feature::AtomicValue(*atomic, *value_tag));
            }
        }
    }

    debug!(
        repair_tags = repair_tags.len(),
        follow = follow.len(),
        before = before.len(),
        after = after.len(),
        features = out.len(),
        "composed feature vector"
    );
    Ok(out)
}
