//! Persisted tree state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::{FieldElement, LeafIndex};

/// One entry of the sorted linked list committed by the tree.
///
/// `next_val == 0` marks the last leaf of the list (the upper bound is unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    /// Committed value.
    #[schemars(with = "String")]
    pub val: FieldElement,
    /// Value of the next leaf in sorted order, or `0` when this is the last leaf.
    #[schemars(with = "String")]
    pub next_val: FieldElement,
    /// Append index of the next leaf in sorted order, or `0` when this is the last leaf.
    pub next_idx: LeafIndex,
}

impl Leaf {
    /// Build a leaf from its three fields.
    #[must_use]
    pub const fn new(val: FieldElement, next_val: FieldElement, next_idx: LeafIndex) -> Self {
        Self {
            val,
            next_val,
            next_idx,
        }
    }

    /// The permanent index-0 leaf `{0, 0, 0}`.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::new(FieldElement::zero(), FieldElement::zero(), 0)
    }

    /// Whether this leaf is the largest value in the list.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_val.is_zero()
    }

    /// Whether `value` falls strictly between this leaf and its successor.
    #[must_use]
    pub fn brackets(&self, value: &FieldElement) -> bool {
        self.val < *value && (self.is_last() || *value < self.next_val)
    }
}

/// Complete serialized state of an indexed Merkle tree.
///
/// Node rows are stored sparsely: row `level` only extends as far as the highest index that
/// was ever written at that level, and absent positions read as that level's zero-hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeState {
    /// Tree depth. Row count of `nodes` is `depth + 1`.
    pub depth: u8,
    /// Stored node hashes by level; row 0 holds leaf hashes, row `depth` the root.
    #[schemars(with = "Vec<Vec<String>>")]
    pub nodes: Vec<Vec<FieldElement>>,
    /// Leaves in append order. Index 0 is the sentinel.
    pub leaves: Vec<Leaf>,
}
