//! Non-membership proof document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Leaf;
use crate::base::FieldElement;

/// Position of the current node relative to its sibling at one level of an authentication path.
///
/// Serialized as the integers `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    /// The current node is the left child; the sibling is on the right.
    Left,
    /// The current node is the right child; the sibling is on the left.
    Right,
}

impl Direction {
    /// Direction of the node at `index` within its level.
    #[must_use]
    pub const fn of_index(index: usize) -> Self {
        if index.is_multiple_of(2) {
            Self::Left
        } else {
            Self::Right
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }
}

/// A direction bit other than `0` or `1`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid direction bit {0}, expected 0 or 1")]
pub struct InvalidDirection(pub u8);

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Proof that `query` is absent from the set committed under `root`.
///
/// `pre_leaf` is the predecessor of `query` (greatest committed value below it). The proof is
/// sound when `pre_leaf` hashes up to `root` along `path`/`directions` and `query` lies strictly
/// between `pre_leaf.val` and `pre_leaf.next_val`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonMembershipProof {
    /// The value proven absent.
    #[schemars(with = "String")]
    pub query: FieldElement,
    /// Snapshot of the predecessor leaf at proof creation time.
    pub pre_leaf: Leaf,
    /// Sibling hashes from level 0 up to level `depth - 1`.
    #[schemars(with = "Vec<String>")]
    pub path: Vec<FieldElement>,
    /// Direction bit per level, aligned with `path`.
    #[schemars(with = "Vec<u8>")]
    pub directions: Vec<Direction>,
    /// Tree root at proof creation time.
    #[schemars(with = "String")]
    pub root: FieldElement,
}
