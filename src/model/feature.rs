//! Feature taxonomies and the composed feature vector.
//!
//! Three categorical vocabularies feed the composition engine:
//! - [`AtomicFeature`]: syntactic shape of one node. The vocabulary is owned
//!   by the visitor collaborator (see [`crate::extract::visitor`]); this enum
//!   only fixes the wire names so vectors stay comparable across runs.
//! - [`ValueFeature`]: role of one named value-expression in the context.
//! - [`RepairFeature`]: broad edit family of the repair itself.
//!
//! Composed [`Feature`]s are a closed tagged union, one variant per joint
//! shape; identity is structural. The output [`FeatureVector`] is a multiset:
//! duplicates are preserved in emission order, since the downstream model may
//! weight by count.

use crate::model::tree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Reserved [`ValueFeatureMap`] key meaning "the statement as a whole".
pub const WHOLE_STATEMENT_KEY: &str = "";

/// Atomic structural tags computed per node by the visitor collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AtomicFeature {
    OpAdd,
    OpSub,
    OpMul,
    OpDiv,
    OpMod,
    OpLt,
    OpLe,
    OpGt,
    OpGe,
    OpEq,
    OpNe,
    Assign,
    AssignZero,
    AssignConst,
    Changed,
    Deref,
    Index,
    MemberAccess,
    Callee,
    CallArgument,
    StmtAssign,
    StmtCall,
    StmtCond,
    StmtControl,
    StmtLoop,
    StmtLabel,
}

/// Role/kind tags for one named value-expression.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueFeature {
    Modified,
    ModifiedSimilar,
    FunctionArgument,
    SizeLiteral,
    LocalVariable,
    GlobalVariable,
    Member,
    StringLiteral,
    ZeroConstant,
    NonZeroConstant,
}

/// Broad edit family derived from the repair kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RepairFeature {
    InsertControl,
    InsertGuard,
    InsertStatement,
    ReplaceCondition,
    ReplaceStatement,
}

/// Which context window a feature component came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Current,
    Previous,
    Next,
}

/// Shape of a composed feature tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    RepairOnly,
    PositionAtomicRepair,
    PositionAtomicAtomic,
    AtomicValue,
}

/// One dimension of the sparse model input vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// What kind of edit happened.
    RepairOnly(RepairFeature),
    /// Which syntactic shapes exist near the edit, per position, jointly with
    /// the edit kind.
    PositionAtomicRepair(Position, AtomicFeature, RepairFeature),
    /// How the same value behaves around the edit: shape in the other window
    /// crossed with shape in the current window.
    PositionAtomicAtomic(Position, AtomicFeature, AtomicFeature),
    /// A value's shape crossed with its own role/modification status.
    AtomicValue(AtomicFeature, ValueFeature),
}

impl Feature {
    pub fn joint_type(&self) -> JointType {
        match self {
            Feature::RepairOnly(_) => JointType::RepairOnly,
            Feature::PositionAtomicRepair(..) => JointType::PositionAtomicRepair,
            Feature::PositionAtomicAtomic(..) => JointType::PositionAtomicAtomic,
            Feature::AtomicValue(..) => JointType::AtomicValue,
        }
    }
}

/// Ordered multiset of composed features for one repair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    features: Vec<Feature>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Order-insensitive multiset view (feature -> multiplicity), for
    /// comparisons across runs.
    pub fn counts(&self) -> HashMap<&Feature, usize> {
        let mut out: HashMap<&Feature, usize> = HashMap::new();
        for f in &self.features {
            *out.entry(f).or_insert(0) += 1;
        }
        out
    }

    /// Number of features of one joint shape.
    pub fn count_of(&self, joint: JointType) -> usize {
        self.features.iter().filter(|f| f.joint_type() == joint).count()
    }
}

/// Map from a value-expression key to the atomic tags observed for it.
///
/// Ordered maps/sets keep iteration deterministic, which in turn keeps the
/// emission order of composed features stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFeatureMap {
    map: BTreeMap<String, BTreeSet<AtomicFeature>>,
}

impl ValueFeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tag for `key`, creating the entry if absent.
    pub fn add(&mut self, key: impl Into<String>, feature: AtomicFeature) {
        self.map.entry(key.into()).or_default().insert(feature);
    }

    pub fn get(&self, key: &str) -> Option<&BTreeSet<AtomicFeature>> {
        self.map.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<BTreeSet<AtomicFeature>> {
        self.map.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.map.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<AtomicFeature>)> {
        self.map.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Set-union `other` into `self` per key. Commutative and idempotent.
    pub fn union_with(&mut self, other: &ValueFeatureMap) {
        for (key, feats) in &other.map {
            self.map.entry(key.clone()).or_default().extend(feats.iter().copied());
        }
    }
}

/// Explicit value-key -> node resolution index for one extraction call.
///
/// Populated by the visitor as a traversal side effect and passed by `&mut`
/// through the whole extraction, so two concurrent extractions on separate
/// indices can never interfere.
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    map: HashMap<String, NodeId>,
}

impl ValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the node a value key resolves to. Last write wins, matching the
    /// visitor convention that later traversals refine earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, node: NodeId) {
        self.map.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.map.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
