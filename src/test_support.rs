//! Deterministic stub visitor for unit tests.

use crate::extract::visitor::StatementVisitor;
use crate::model::feature::{AtomicFeature, ValueFeatureMap, ValueIndex, WHOLE_STATEMENT_KEY};
use crate::model::tree::{LiteralValue, NodeId, NodeKind, SyntaxTree};

/// Maps node shapes to fixed atomic tags and registers every named value in
/// the index, so test expectations can be computed by hand.
pub struct ShapeVisitor;

impl StatementVisitor for ShapeVisitor {
    fn traverse(
        &mut self,
        tree: &SyntaxTree,
        node: NodeId,
        index: &mut ValueIndex,
    ) -> ValueFeatureMap {
        let mut map = ValueFeatureMap::new();
        if let Some(tag) = whole_statement_tag(tree.kind(node)) {
            map.add(WHOLE_STATEMENT_KEY, tag);
        }
        visit(tree, node, index, &mut map);
        map
    }
}

fn whole_statement_tag(kind: &NodeKind) -> Option<AtomicFeature> {
    match kind {
        NodeKind::Conditional { .. } => Some(AtomicFeature::StmtCond),
        NodeKind::LocalVarDecl { .. } => Some(AtomicFeature::StmtAssign),
        NodeKind::Statement => Some(AtomicFeature::StmtCall),
        NodeKind::Block => Some(AtomicFeature::StmtControl),
        _ => None,
    }
}

fn visit(tree: &SyntaxTree, node: NodeId, index: &mut ValueIndex, map: &mut ValueFeatureMap) {
    match tree.kind(node) {
        NodeKind::VarAccess { name } => {
            map.add(name.clone(), AtomicFeature::Index);
            index.insert(name.clone(), node);
        }
        NodeKind::LocalVarDecl { name } => {
            map.add(name.clone(), AtomicFeature::Assign);
            index.insert(name.clone(), node);
        }
        NodeKind::CallableRef { name, .. } => {
            map.add(name.clone(), AtomicFeature::Callee);
            index.insert(name.clone(), node);
        }
        NodeKind::Field { name } => {
            map.add(name.clone(), AtomicFeature::MemberAccess);
            index.insert(name.clone(), node);
        }
        NodeKind::Literal(LiteralValue::Int(i)) => {
            map.add(i.to_string(), AtomicFeature::AssignConst);
            index.insert(i.to_string(), node);
        }
        NodeKind::Literal(LiteralValue::Str(s)) => {
            map.add(s.clone(), AtomicFeature::AssignConst);
            index.insert(s.clone(), node);
        }
        _ => {}
    }
    for child in tree.children(node) {
        visit(tree, *child, index, map);
    }
}
