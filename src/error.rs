use thiserror::Error;

use crate::Side;

/// Invariant violations.
///
/// None of these is expected from a tree that was only mutated through its
/// public API: they signal a defect and abort the operation that hit them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot rotate {rotation}: the {missing} child is missing")]
    MissingChild { rotation: Side, missing: Side },

    #[error("a black-deficient position has no sibling")]
    MissingSibling,

    #[error("a link points at a freed node")]
    DanglingLink,

    #[error("the root is red")]
    RedRoot,

    #[error("a red node has a red child")]
    RedChildOfRed,

    #[error("paths below a node disagree on their black-height")]
    BlackHeightMismatch,

    #[error("keys are not in strictly increasing order")]
    OutOfOrder,

    #[error("a child does not point back to its parent")]
    BrokenParentLink,

    #[error("the tree counts {expected} keys but {found} are reachable")]
    LenMismatch { expected: usize, found: usize },
}

pub type TreeResult<T> = Result<T, TreeError>;
