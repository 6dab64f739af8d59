//! Stateless non-membership proof verification.

use imt_core::base::{FieldElement, Hash2};
use imt_core::schema::proof::{Direction, NonMembershipProof};
use imt_core::schema::state::Leaf;

use crate::core::DEPTH;

/// Fold `leaf` up an authentication path and return the resulting root.
///
/// Pairs of `path` and `directions` are consumed together; extra entries in the longer slice
/// are ignored.
#[must_use]
pub fn compute_root<H: Hash2>(
    hasher: &H,
    leaf: &Leaf,
    path: &[FieldElement],
    directions: &[Direction],
) -> FieldElement {
    let start = hasher.hash2(&leaf.val, &leaf.next_val);
    path.iter()
        .zip(directions)
        .fold(start, |node, (sibling, direction)| match direction {
            Direction::Left => hasher.hash2(&node, sibling),
            Direction::Right => hasher.hash2(sibling, &node),
        })
}

/// Check a non-membership proof against its own root.
///
/// Pure: never touches tree state and never fails. A proof is accepted only when
/// - `path` and `directions` both have one entry per tree level,
/// - `pre_leaf.val < query`, and `query < pre_leaf.next_val` unless `next_val` is `0`,
/// - `pre_leaf` hashes up to `root` along the path.
///
/// Whether `root` is the root of a particular tree is the caller's concern.
#[must_use]
pub fn verify_non_membership_proof<H: Hash2>(hasher: &H, proof: &NonMembershipProof) -> bool {
    if proof.path.len() != DEPTH || proof.directions.len() != DEPTH {
        return false;
    }
    if !proof.pre_leaf.brackets(&proof.query) {
        return false;
    }
    compute_root(hasher, &proof.pre_leaf, &proof.path, &proof.directions) == proof.root
}
