//! Indexed Merkle tree utilities.
//!
//! The tree commits to a set of field elements stored as a sorted singly-linked list of leaves.
//! Leaves are placed in a fixed-depth binary hash tree by append order, and a
//! [`NonMembershipProof`] shows a value is absent by authenticating the leaf whose value is the
//! greatest one below it.

mod core;
mod ledger;
mod proof;
mod store;
mod tree;
mod zeros;

pub use core::{MAX_LEAVES, TREE_DEPTH, TreeError};

pub use imt_core::schema::proof::{Direction, NonMembershipProof};
pub use imt_core::schema::state::{Leaf, TreeState};
pub use proof::{compute_root, verify_non_membership_proof};
pub use tree::IndexedMerkleTree;
pub use zeros::ZeroHashes;
