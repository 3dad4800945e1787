//! Context window selection around a repair's anchor statement.
//!
//! Two groups are computed from the primary action:
//! - the *immediate follow* group: the anchor itself, widened for
//!   replace-mutation edits with the branches of an inserted conditional or
//!   the next sibling statement;
//! - the *local window*: up to [`WINDOW_RADIUS`] sibling statements on each
//!   side of the anchor.
//!
//! Bounding context to a small fixed radius keeps the feature vector size
//! stable regardless of method length.

use crate::errors::{FeatureResult, InvariantError};
use crate::model::repair::{Repair, RepairActionKind};
use crate::model::tree::{Capability, NodeId, SyntaxTree};
use tracing::trace;

/// Sibling statements considered on each side of the anchor.
pub const WINDOW_RADIUS: usize = 3;

/// Statements forming the "current" context of the repair.
///
/// Always non-empty; the first element is the primary action's source node.
pub fn immediate_follow_statements(tree: &SyntaxTree, repair: &Repair) -> Vec<NodeId> {
    let primary = repair.primary();
    let mut out = vec![primary.source_node];
    if primary.kind != RepairActionKind::ReplaceMutation {
        return out;
    }

    let mut saw_else = false;
    if let Some(dest) = primary.dest_node
        && let Some((then_branch, else_branch)) = tree.branches(dest)
    {
        if let Some(then_branch) = then_branch {
            append_flattened(tree, then_branch, &mut out);
        }
        if let Some(else_branch) = else_branch {
            saw_else = true;
            append_flattened(tree, else_branch, &mut out);
        }
    }

    // Without an else part the edit falls through, so the statement right
    // after the anchor belongs to the current context.
    if !saw_else
        && let Some(block) = tree.enclosing_statement_list(primary.source_node)
    {
        let stmts = tree.children(block);
        if let Some(pos) = stmts.iter().position(|s| *s == primary.source_node)
            && let Some(next) = stmts.get(pos + 1)
        {
            out.push(*next);
        }
    }

    trace!(count = out.len(), "immediate follow group");
    out
}

/// Flatten a statement block into its members; push a lone statement as-is.
fn append_flattened(tree: &SyntaxTree, node: NodeId, out: &mut Vec<NodeId>) {
    if tree.kind(node).has(Capability::BlockOfStatements) {
        out.extend_from_slice(tree.children(node));
    } else {
        out.push(node);
    }
}

/// Sibling statements before/after the anchor, clipped to [`WINDOW_RADIUS`]
/// on each side. The anchor joins neither window slice; for non-replace
/// edits it is appended to `after`, so such an edit always sees itself as
/// following context.
///
/// An anchor without an enclosing statement list yields empty window slices
/// (expected for detached or top-level statements). An enclosing list that
/// does not contain the anchor violates the tree contract.
pub fn local_window_statements(
    tree: &SyntaxTree,
    repair: &Repair,
) -> FeatureResult<(Vec<NodeId>, Vec<NodeId>)> {
    let primary = repair.primary();
    let anchor = primary.source_node;
    let mut before = Vec::new();
    let mut after = Vec::new();

    if let Some(block) = tree.enclosing_statement_list(anchor) {
        let stmts = tree.children(block);
        let idx = stmts
            .iter()
            .position(|s| *s == anchor)
            .ok_or(InvariantError::AnchorNotInStatementList)?;

        let start = idx.saturating_sub(WINDOW_RADIUS);
        let end = (idx + WINDOW_RADIUS + 1).min(stmts.len());
        for (offset, stmt) in stmts[start..end].iter().enumerate() {
            let i = start + offset;
            if i < idx {
                before.push(*stmt);
            } else if i > idx {
                after.push(*stmt);
            }
        }
    }

    if primary.kind != RepairActionKind::ReplaceMutation {
        after.push(anchor);
    }

    trace!(
        before = before.len(),
        after = after.len(),
        "local window groups"
    );
    Ok((before, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::repair::RepairAction;
    use crate::model::tree::NodeKind;

    /// Block with `n_before` statements, the anchor, then `n_after` statements.
    fn flanked(n_before: usize, n_after: usize) -> (SyntaxTree, NodeId) {
        let mut t = SyntaxTree::new();
        let m = t.add_root(NodeKind::Method { name: "m".into() });
        let b = t.add_child(m, NodeKind::Block);
        for _ in 0..n_before {
            t.add_child(b, NodeKind::Statement);
        }
        let anchor = t.add_child(b, NodeKind::Statement);
        for _ in 0..n_after {
            t.add_child(b, NodeKind::Statement);
        }
        (t, anchor)
    }

    #[test]
    fn follow_group_of_plain_edit_is_the_anchor() {
        let (t, anchor) = flanked(2, 2);
        let r = Repair::single(RepairAction::new(RepairActionKind::Guard, anchor));
        assert_eq!(immediate_follow_statements(&t, &r), vec![anchor]);
    }

    #[test]
    fn follow_group_flattens_conditional_branches() {
        let (mut t, anchor) = flanked(0, 1);
        let cond = t.add_root(NodeKind::Conditional {
            then_branch: None,
            else_branch: None,
        });
        let then_b = t.add_child(cond, NodeKind::Block);
        let t1 = t.add_child(then_b, NodeKind::Statement);
        let t2 = t.add_child(then_b, NodeKind::Statement);
        let else_s = t.add_child(cond, NodeKind::Statement);
        t.set_branches(cond, then_b, Some(else_s));

        let mut action = RepairAction::new(RepairActionKind::ReplaceMutation, anchor);
        action.dest_node = Some(cond);
        let r = Repair::single(action);
        // Then-members flattened, else appended as-is; no next-sibling fallback.
        assert_eq!(
            immediate_follow_statements(&t, &r),
            vec![anchor, t1, t2, else_s]
        );
    }

    #[test]
    fn follow_group_without_else_takes_next_sibling() {
        let (mut t, anchor) = flanked(0, 2);
        let next = t.enclosing_statement_list(anchor).map(|b| t.children(b)[1]);
        let cond = t.add_root(NodeKind::Conditional {
            then_branch: None,
            else_branch: None,
        });
        let then_s = t.add_child(cond, NodeKind::Statement);
        t.set_branches(cond, then_s, None);

        let mut action = RepairAction::new(RepairActionKind::ReplaceMutation, anchor);
        action.dest_node = Some(cond);
        let r = Repair::single(action);
        assert_eq!(
            immediate_follow_statements(&t, &r),
            vec![anchor, then_s, next.unwrap()]
        );
    }

    #[test]
    fn follow_group_of_non_conditional_dest_takes_next_sibling() {
        let (mut t, anchor) = flanked(0, 1);
        let next = t.enclosing_statement_list(anchor).map(|b| t.children(b)[1]);
        let dest = t.add_root(NodeKind::Statement);

        let mut action = RepairAction::new(RepairActionKind::ReplaceMutation, anchor);
        action.dest_node = Some(dest);
        let r = Repair::single(action);
        assert_eq!(immediate_follow_statements(&t, &r), vec![anchor, next.unwrap()]);
    }

    #[test]
    fn window_clips_to_radius() {
        let (t, anchor) = flanked(5, 5);
        let r = Repair::single(RepairAction::new(RepairActionKind::Guard, anchor));
        let (before, after) = local_window_statements(&t, &r).unwrap();
        assert_eq!(before.len(), 3);
        // Three following statements plus the anchor echo for non-replace kinds.
        assert_eq!(after.len(), 4);
        assert_eq!(after[3], anchor);
        assert!(!before.contains(&anchor));
    }

    #[test]
    fn window_of_replace_mutation_has_no_anchor_echo() {
        let (t, anchor) = flanked(1, 1);
        let r = Repair::single(RepairAction::new(
            RepairActionKind::ReplaceMutation,
            anchor,
        ));
        let (before, after) = local_window_statements(&t, &r).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 1);
        assert!(!after.contains(&anchor));
    }

    #[test]
    fn window_truncates_at_block_edges() {
        let (t, anchor) = flanked(1, 0);
        let r = Repair::single(RepairAction::new(
            RepairActionKind::ReplaceMutation,
            anchor,
        ));
        let (before, after) = local_window_statements(&t, &r).unwrap();
        assert_eq!(before.len(), 1);
        assert!(after.is_empty());
    }

    #[test]
    fn detached_anchor_yields_empty_window() {
        let mut t = SyntaxTree::new();
        let anchor = t.add_root(NodeKind::Statement);
        let r = Repair::single(RepairAction::new(RepairActionKind::Replace, anchor));
        let (before, after) = local_window_statements(&t, &r).unwrap();
        assert!(before.is_empty());
        assert_eq!(after, vec![anchor]);
    }

    #[test]
    fn inconsistent_tree_is_an_invariant_violation() {
        // A hand-crafted tree whose node 1 claims node 0 (a block) as parent
        // while the block lists no children. Only reachable through
        // deserialized input, never through the builder.
        let t: SyntaxTree = serde_json::from_value(serde_json::json!({
            "nodes": [
                { "kind": "block", "parent": null, "children": [] },
                { "kind": "statement", "parent": 0, "children": [] }
            ]
        }))
        .unwrap();
        let r = Repair::single(RepairAction::new(RepairActionKind::Guard, NodeId(1)));
        assert!(local_window_statements(&t, &r).is_err());
    }
}
