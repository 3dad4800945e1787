//! Arena-backed syntax tree model shared by the extraction pipeline.
//!
//! The tree is produced upstream (by whatever parser feeds the ranking
//! pipeline) and consumed here read-only. Nodes are addressed by [`NodeId`]
//! handles; node identity is handle identity within one tree. The node kind
//! set is intentionally closed: capability checks go through [`Capability`]
//! and an exhaustive match instead of open-ended downcasts, so the schema
//! stays stable for every consumer of the feature vectors.

use serde::{Deserialize, Serialize};

/// Cheap copyable handle into a [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

/// Literal payload carried by [`NodeKind::Literal`] nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    /// String literal, raw text without quotes.
    Str(String),
    /// Integer literal.
    Int(i64),
    /// Any other literal kind (float, char, bool, null).
    Other,
}

/// Closed set of node kinds the feature pipeline distinguishes.
///
/// Extend conservatively; every new variant must be wired into
/// [`NodeKind::capabilities`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Class-like declaration container.
    Class { name: String },
    /// Method/function declaration container. Parameters are child nodes.
    Method { name: String },
    /// Formal parameter of a method.
    Parameter { name: String },
    /// Ordered list of statements (block body).
    Block,
    /// `if`-like conditional statement. Branch targets are set explicitly
    /// via [`SyntaxTree::set_branches`] and must also be children.
    Conditional {
        then_branch: Option<NodeId>,
        else_branch: Option<NodeId>,
    },
    /// Local variable declaration statement.
    LocalVarDecl { name: String },
    /// Variable read/write or array/index access expression.
    VarAccess { name: String },
    /// Reference to a callable, with its formal parameter count.
    CallableRef { name: String, param_count: usize },
    /// Field declaration or field reference.
    Field { name: String },
    /// Literal expression.
    Literal(LiteralValue),
    /// Opaque statement the pipeline does not look inside.
    Statement,
}

/// Capabilities a node may expose. One node kind can carry several
/// (a block is also a statement, a conditional is also a statement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Statement,
    DeclarationContainer,
    ConditionalBranch,
    BlockOfStatements,
    Literal,
    VariableOrIndexAccess,
    CallableReference,
    LocalVariableDeclaration,
    Parameter,
    Field,
}

impl NodeKind {
    /// Fixed capability set per kind.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            NodeKind::Class { .. } => &[DeclarationContainer],
            NodeKind::Method { .. } => &[DeclarationContainer],
            NodeKind::Parameter { .. } => &[Parameter],
            NodeKind::Block => &[BlockOfStatements, Statement],
            NodeKind::Conditional { .. } => &[ConditionalBranch, Statement],
            NodeKind::LocalVarDecl { .. } => &[LocalVariableDeclaration, Statement],
            NodeKind::VarAccess { .. } => &[VariableOrIndexAccess],
            NodeKind::CallableRef { .. } => &[CallableReference],
            NodeKind::Field { .. } => &[Field],
            NodeKind::Literal(_) => &[Literal],
            NodeKind::Statement => &[Statement],
        }
    }

    /// Check one capability.
    pub fn has(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Read-mostly syntax tree. Built top-down with [`SyntaxTree::add_root`] /
/// [`SyntaxTree::add_child`], then navigated by the extraction pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node (tree root or detached replacement fragment).
    pub fn add_root(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Wire the branch targets of a [`NodeKind::Conditional`] node.
    /// No-op for other kinds.
    pub fn set_branches(&mut self, cond: NodeId, then_branch: NodeId, else_branch: Option<NodeId>) {
        if let NodeKind::Conditional {
            then_branch: t,
            else_branch: e,
        } = &mut self.nodes[cond.0].kind
        {
            *t = Some(then_branch);
            *e = else_branch;
        }
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Branch targets of a conditional node: `(then, else)`.
    pub fn branches(&self, id: NodeId) -> Option<(Option<NodeId>, Option<NodeId>)> {
        match self.nodes[id.0].kind {
            NodeKind::Conditional {
                then_branch,
                else_branch,
            } => Some((then_branch, else_branch)),
            _ => None,
        }
    }

    /// Nearest ancestor (excluding `id` itself) exposing `cap`.
    pub fn enclosing_with(&self, id: NodeId, cap: Capability) -> Option<NodeId> {
        let mut cur = self.parent(id);
        while let Some(n) = cur {
            if self.kind(n).has(cap) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }

    /// The statement list directly containing `id`: its parent, when that
    /// parent is a block. Statements nested deeper (e.g. inside an `if`
    /// branch of the parent block) do not count as siblings.
    pub fn enclosing_statement_list(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
            .filter(|p| self.kind(*p).has(Capability::BlockOfStatements))
    }

    /// Whether the subtree rooted at `id` (inclusive) contains a node with
    /// capability `cap`.
    pub fn subtree_has(&self, id: NodeId, cap: Capability) -> bool {
        if self.kind(id).has(cap) {
            return true;
        }
        self.children(id).iter().any(|c| self.subtree_has(*c, cap))
    }

    /// Pre-order descendants of `id` (inclusive) exposing `cap`.
    pub fn descendants_with(&self, id: NodeId, cap: Capability) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_with(id, cap, &mut out);
        out
    }

    fn collect_with(&self, id: NodeId, cap: Capability, out: &mut Vec<NodeId>) {
        if self.kind(id).has(cap) {
            out.push(id);
        }
        for c in self.children(id) {
            self.collect_with(*c, cap, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_sets_are_closed() {
        assert!(NodeKind::Block.has(Capability::Statement));
        assert!(NodeKind::Block.has(Capability::BlockOfStatements));
        assert!(
            NodeKind::Conditional {
                then_branch: None,
                else_branch: None
            }
            .has(Capability::ConditionalBranch)
        );
        assert!(!NodeKind::Statement.has(Capability::BlockOfStatements));
        assert!(
            NodeKind::LocalVarDecl { name: "x".into() }.has(Capability::LocalVariableDeclaration)
        );
    }

    #[test]
    fn navigation_and_descendants() {
        let mut t = SyntaxTree::new();
        let m = t.add_root(NodeKind::Method { name: "foo".into() });
        let b = t.add_child(m, NodeKind::Block);
        let s = t.add_child(b, NodeKind::Statement);
        let f = t.add_child(s, NodeKind::Field { name: "len".into() });

        assert_eq!(t.parent(f), Some(s));
        assert_eq!(t.enclosing_statement_list(s), Some(b));
        assert_eq!(t.enclosing_statement_list(b), None);
        assert_eq!(
            t.enclosing_with(f, Capability::DeclarationContainer),
            Some(m)
        );
        assert!(t.subtree_has(s, Capability::Field));
        assert!(!t.subtree_has(s, Capability::Literal));
        assert_eq!(t.descendants_with(m, Capability::Statement), vec![b, s]);
    }

    #[test]
    fn conditional_branch_wiring() {
        let mut t = SyntaxTree::new();
        let c = t.add_root(NodeKind::Conditional {
            then_branch: None,
            else_branch: None,
        });
        let then_b = t.add_child(c, NodeKind::Block);
        t.set_branches(c, then_b, None);
        assert_eq!(t.branches(c), Some((Some(then_b), None)));
        assert_eq!(t.branches(then_b), None);
    }
}
