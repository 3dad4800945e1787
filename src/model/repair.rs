//! Data carriers describing one candidate repair (a localized source edit).
//!
//! A [`Repair`] is an ordered, non-empty list of [`RepairAction`]s; the first
//! action is the *primary* action whose source node anchors every context
//! window computation downstream. The carriers hold no logic beyond small
//! accessors.

use crate::model::tree::NodeId;
use serde::{Deserialize, Serialize};

/// Edit taxonomy for a single atomic action.
///
/// Drives both repair-feature classification and the context-window strategy
/// (`ReplaceMutation` widens the immediate-follow group and suppresses the
/// anchor echo in the local window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairActionKind {
    /// Insert an early control-flow exit (return/break) behind a guard.
    InsertControlExit,
    /// Wrap the statement in a guard condition.
    Guard,
    /// Guard specialized to a known failure predicate.
    SpecialGuard,
    /// Add an initializer for an uninitialized value.
    AddInitializer,
    /// Insert a new statement and replace the original.
    AddAndReplace,
    /// Strengthen an existing condition.
    TightenCondition,
    /// Weaken an existing condition.
    LoosenCondition,
    /// Replace a statement or sub-expression.
    Replace,
    /// Replace a string literal.
    ReplaceStringLiteral,
    /// Low-level replace produced by the mutation generator.
    ReplaceMutation,
}

/// One atomic edit inside a repair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairAction {
    /// Edit kind of this action.
    pub kind: RepairActionKind,
    /// Node being edited; always present.
    pub source_node: NodeId,
    /// Replacement/inserted node, present for replace/insert kinds.
    #[serde(default)]
    pub dest_node: Option<NodeId>,
    /// Textual form of the replaced expression, if the edit rewrote one.
    #[serde(default)]
    pub old_expr_text: Option<String>,
    /// Textual form of the replacement expression.
    #[serde(default)]
    pub new_expr_text: Option<String>,
}

impl RepairAction {
    /// Minimal action with no replacement payload.
    pub fn new(kind: RepairActionKind, source_node: NodeId) -> Self {
        Self {
            kind,
            source_node,
            dest_node: None,
            old_expr_text: None,
            new_expr_text: None,
        }
    }
}

/// One candidate repair: a non-empty ordered action sequence describing a
/// single localized edit, plus the overall taxonomy label used for
/// repair-feature derivation. The label may be absent for raw diffs that were
/// never classified; such repairs yield an empty repair-feature set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    /// Overall edit kind; `None` for unclassified repairs.
    #[serde(default)]
    pub kind: Option<RepairActionKind>,
    /// Atomic actions, primary first. Must be non-empty.
    pub actions: Vec<RepairAction>,
}

impl Repair {
    /// Repair with a single action, whose kind doubles as the overall kind.
    pub fn single(action: RepairAction) -> Self {
        Self {
            kind: Some(action.kind),
            actions: vec![action],
        }
    }

    /// The primary action anchoring context-window computation.
    ///
    /// Callers construct repairs through [`Repair::single`] or with a
    /// non-empty `actions` list; an empty list is rejected at the pipeline
    /// boundary before extraction starts.
    pub fn primary(&self) -> &RepairAction {
        &self.actions[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sets_overall_kind() {
        let r = Repair::single(RepairAction::new(RepairActionKind::Guard, NodeId(0)));
        assert_eq!(r.kind, Some(RepairActionKind::Guard));
        assert_eq!(r.primary().source_node, NodeId(0));
    }
}
