//! Crate-wide error hierarchy for repair-feature-prep.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Root error type for the repair-feature-prep crate.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A precondition of the extraction contract was violated.
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    /// Input rejected before extraction started (bad repair shape, config).
    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Contract violations detected mid-extraction.
///
/// These mark a programming error in the caller or the visitor collaborator,
/// not a recoverable runtime condition; the ranking pipeline is expected to
/// drop the offending repair and continue.
#[derive(Debug, Error)]
pub enum InvariantError {
    /// A value key produced by the visitor has no entry in the value index.
    #[error("value key {0:?} missing from the value index")]
    UnresolvedValueKey(String),

    /// The anchor's parent is a statement list that does not contain it.
    #[error("anchor statement not found in its enclosing statement list")]
    AnchorNotInStatementList,
}
