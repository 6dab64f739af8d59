//! Shared tree constants and errors.

use imt_core::base::FieldElement;
use thiserror::Error;

/// The depth of the tree.
///
/// With 32 levels, the tree can hold up to 2^32 leaves, sentinel included.
pub const TREE_DEPTH: u8 = 32;

/// [`TREE_DEPTH`] as a row index.
pub(crate) const DEPTH: usize = 32;

/// Number of leaf positions addressable at [`TREE_DEPTH`].
pub const MAX_LEAVES: u64 = 2_u64.pow(DEPTH_U32);

const DEPTH_U32: u32 = 32;

/// Errors that can occur when working with the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The value is already committed. The tree is left unchanged.
    #[error("Value {0} is already in the tree")]
    DuplicateValue(FieldElement),

    /// `0` marks the sentinel leaf and cannot be inserted.
    #[error("Value 0 is reserved for the sentinel leaf")]
    ReservedValue,

    /// An internal invariant does not hold. Indicates a bug or a corrupted state document.
    #[error("Tree invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// No committed value is below the query, so no predecessor leaf exists.
    #[error("No leaf value is below {0}, cannot build a non-membership proof")]
    EmptyTreeOrNoPredecessor(FieldElement),

    /// Introspection level outside `0..=depth`.
    #[error("Level {level} is outside the tree levels 0..={depth}")]
    InvalidLevel {
        /// The requested level.
        level: i64,
        /// The tree depth.
        depth: u8,
    },

    /// Every leaf position is in use.
    #[error("Tree is full, it can hold at most {0} leaves")]
    CapacityExceeded(u64),

    /// A state document does not describe a tree of this depth.
    #[error("State depth mismatch: expected {expected}, found {found}")]
    DepthMismatch {
        /// Value required by this tree.
        expected: usize,
        /// Value found in the document.
        found: usize,
    },

    /// A state document has no leaves, so the sentinel is missing.
    #[error("State has no sentinel leaf")]
    MissingSentinel,
}
