//! Classification of one value-expression key into value-level tags.
//!
//! The steps are best-effort heuristics inherited from the original ranking
//! design; several can co-fire for the same key, and all tags form one set
//! with no priority ordering. The downstream model was tuned against exactly
//! this behavior.

use crate::errors::{FeatureResult, InvariantError};
use crate::model::feature::{ValueFeature, ValueIndex};
use crate::model::repair::Repair;
use crate::model::tree::{Capability, LiteralValue, NodeId, NodeKind, SyntaxTree};
use std::collections::BTreeSet;
use tracing::trace;

/// Texts closer in length than this ratio band count as "similar".
const SIMILAR_RATIO_LOW: f64 = 0.5;
const SIMILAR_RATIO_HIGH: f64 = 2.0;
/// Both texts must be longer than this for the similarity check.
const SIMILAR_MIN_LEN: usize = 3;

/// Classify `value_key` into its value-feature set.
///
/// The key must resolve in `index`; a missing entry means the visitor broke
/// its contract and surfaces as an invariant violation.
pub fn classify(
    value_key: &str,
    tree: &SyntaxTree,
    repair: &Repair,
    index: &ValueIndex,
) -> FeatureResult<BTreeSet<ValueFeature>> {
    let mut out = BTreeSet::new();
    let primary = repair.primary();

    // Modification status against the primary action's rewrite texts.
    if let (Some(old), Some(new)) = (&primary.old_expr_text, &primary.new_expr_text) {
        if value_key == new {
            out.insert(ValueFeature::Modified);
        }
        if !old.is_empty() && !new.is_empty() {
            let ratio = old.len() as f64 / new.len() as f64;
            if ratio > SIMILAR_RATIO_LOW
                && ratio < SIMILAR_RATIO_HIGH
                && old.len() > SIMILAR_MIN_LEN
                && new.len() > SIMILAR_MIN_LEN
                && (old.contains(new.as_str()) || new.contains(old.as_str()))
            {
                out.insert(ValueFeature::ModifiedSimilar);
            }
        }
    }

    // Formal parameter of the method receiving the edit.
    if let Some(dest) = primary.dest_node
        && let Some(method) = enclosing_method(tree, dest)
        && tree.children(method).iter().any(|c| {
            matches!(tree.kind(*c), NodeKind::Parameter { name } if name == value_key)
        })
    {
        out.insert(ValueFeature::FunctionArgument);
    }

    if value_key.contains("length") || value_key.contains("size") {
        out.insert(ValueFeature::SizeLiteral);
    }

    let node = index
        .get(value_key)
        .ok_or_else(|| InvariantError::UnresolvedValueKey(value_key.to_string()))?;

    let kind = tree.kind(node);
    if kind.has(Capability::VariableOrIndexAccess)
        || kind.has(Capability::LocalVariableDeclaration)
    {
        if kind.has(Capability::LocalVariableDeclaration) {
            out.insert(ValueFeature::LocalVariable);
        } else {
            out.insert(ValueFeature::GlobalVariable);
        }
    } else if let NodeKind::CallableRef { param_count, .. } = kind {
        // Callee usage with arguments reads as locally scoped.
        if *param_count > 0 {
            out.insert(ValueFeature::LocalVariable);
        }
    } else if kind.has(Capability::ConditionalBranch) {
        out.insert(ValueFeature::LocalVariable);
    }

    if tree.subtree_has(node, Capability::Field) {
        out.insert(ValueFeature::Member);
    }

    if let NodeKind::Literal(value) = kind {
        match value {
            LiteralValue::Str(_) => {
                out.insert(ValueFeature::StringLiteral);
            }
            LiteralValue::Int(0) => {
                out.insert(ValueFeature::ZeroConstant);
            }
            LiteralValue::Int(_) => {
                out.insert(ValueFeature::NonZeroConstant);
            }
            LiteralValue::Other => {}
        }
    }

    trace!(key = value_key, tags = out.len(), "classified value key");
    Ok(out)
}

/// Nearest strictly-enclosing method declaration.
fn enclosing_method(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut cur = tree.parent(node);
    while let Some(n) = cur {
        if matches!(tree.kind(n), NodeKind::Method { .. }) {
            return Some(n);
        }
        cur = tree.parent(n);
    }
    None
}
