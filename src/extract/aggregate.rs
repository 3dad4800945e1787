//! Folding per-statement visitor results into one value->tags map.

use crate::extract::visitor::StatementVisitor;
use crate::model::feature::{ValueFeatureMap, ValueIndex};
use crate::model::tree::{NodeId, SyntaxTree};
use tracing::trace;

/// Traverse every statement in `stmts` and union the resulting maps per key.
///
/// Union is commutative and idempotent, so the statement order does not
/// affect the final map.
pub fn aggregate_statements<V: StatementVisitor>(
    visitor: &mut V,
    tree: &SyntaxTree,
    stmts: &[NodeId],
    index: &mut ValueIndex,
) -> ValueFeatureMap {
    let mut acc = ValueFeatureMap::new();
    for stmt in stmts {
        let result = visitor.traverse(tree, *stmt, index);
        acc.union_with(&result);
    }
    trace!(statements = stmts.len(), keys = acc.keys().count(), "aggregated");
    acc
}
