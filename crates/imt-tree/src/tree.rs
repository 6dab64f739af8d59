//! The indexed Merkle tree facade.

use imt_core::base::{FieldElement, Hash2};
use imt_core::schema::proof::NonMembershipProof;
use imt_core::schema::state::{Leaf, TreeState};
use tracing::debug;

use crate::core::{DEPTH, TREE_DEPTH, TreeError};
use crate::ledger::LeafLedger;
use crate::proof::verify_non_membership_proof;
use crate::store::NodeStore;
use crate::zeros::ZeroHashes;

/// A fixed-depth Merkle tree over a sorted linked list of leaves.
///
/// Leaf `i` (in append order) sits at level-0 position `i` and hashes as
/// `hash2(val, next_val)`. Inserting a value splices it after its predecessor, so each insert
/// rewrites exactly two leaf paths: the predecessor's and the new leaf's.
///
/// # Usage
///
/// 1. Create with [`IndexedMerkleTree::new`] (the tree starts with the sentinel leaf)
/// 2. Add values with [`IndexedMerkleTree::insert`]
/// 3. Prove absence with [`IndexedMerkleTree::create_non_membership_proof`] and check it
///    anywhere with [`crate::verify_non_membership_proof`]
#[derive(Debug, Clone)]
pub struct IndexedMerkleTree<H> {
    hasher: H,
    ledger: LeafLedger,
    store: NodeStore,
}

impl<H: Hash2> IndexedMerkleTree<H> {
    /// Create a tree holding only the sentinel leaf.
    #[must_use]
    pub fn new(hasher: H) -> Self {
        let store = NodeStore::new(ZeroHashes::new(&hasher));
        let mut tree = Self {
            hasher,
            ledger: LeafLedger::new(),
            store,
        };
        let sentinel = Leaf::sentinel();
        tree.store.recompute_path_from(&tree.hasher, 0, &sentinel);
        tree
    }

    /// Rebuild a tree from a state document.
    ///
    /// Stored hashes are trusted: nothing is recomputed or verified against the leaves.
    ///
    /// # Errors
    /// - [`TreeError::DepthMismatch`] if the document is not for a tree of [`TREE_DEPTH`].
    /// - [`TreeError::MissingSentinel`] if the document has no leaves.
    /// - [`TreeError::DuplicateValue`] if two leaves hold the same value.
    /// - [`TreeError::CapacityExceeded`] if the document has more leaves than positions.
    pub fn from_state(state: TreeState, hasher: H) -> Result<Self, TreeError> {
        if state.depth != TREE_DEPTH {
            return Err(TreeError::DepthMismatch {
                expected: DEPTH,
                found: usize::from(state.depth),
            });
        }
        let store = NodeStore::from_rows(state.nodes, ZeroHashes::new(&hasher))?;
        let ledger = LeafLedger::from_leaves(state.leaves)?;
        debug!(leaves = ledger.len(), "Tree state loaded");
        Ok(Self {
            hasher,
            ledger,
            store,
        })
    }

    /// Snapshot the full state for persistence.
    #[must_use]
    pub fn to_state(&self) -> TreeState {
        TreeState {
            depth: TREE_DEPTH,
            nodes: self.store.rows().to_vec(),
            leaves: self.ledger.leaves().to_vec(),
        }
    }

    /// Insert `value` into the committed set.
    ///
    /// # Errors
    /// - [`TreeError::ReservedValue`] for `0`.
    /// - [`TreeError::DuplicateValue`] if the value is already present.
    /// - [`TreeError::CapacityExceeded`] when every leaf position is used.
    /// - [`TreeError::InvariantViolation`] if the leaf list is corrupted.
    ///
    /// The tree is unchanged whenever an error is returned.
    pub fn insert(&mut self, value: impl Into<FieldElement>) -> Result<(), TreeError> {
        let value = value.into();
        let (pred_index, new_index) = self.ledger.insert(value)?;
        self.refresh_leaf(pred_index)?;
        self.refresh_leaf(new_index)?;
        debug!(
            predecessor = pred_index,
            index = new_index,
            root = %self.root(),
            "Leaf inserted"
        );
        Ok(())
    }

    fn refresh_leaf(&mut self, index: usize) -> Result<(), TreeError> {
        let leaf = self
            .ledger
            .get(index)
            .ok_or(TreeError::InvariantViolation(
                "refreshed leaf is not in the ledger",
            ))?;
        self.store.recompute_path_from(&self.hasher, index, leaf);
        Ok(())
    }

    /// Build a proof that `value` is not in the tree.
    ///
    /// The proof carries the predecessor leaf, its authentication path and the current root.
    /// Asking for a value that is present still yields a proof, but one that fails
    /// verification because the value is the predecessor's `next_val`.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyTreeOrNoPredecessor`] when no leaf value is below `value`,
    /// which only happens for `0`.
    pub fn create_non_membership_proof(
        &self,
        value: &FieldElement,
    ) -> Result<NonMembershipProof, TreeError> {
        let pred_index = self
            .ledger
            .find_predecessor(value)
            .ok_or_else(|| TreeError::EmptyTreeOrNoPredecessor(value.clone()))?;
        let pre_leaf = self
            .ledger
            .get(pred_index)
            .ok_or(TreeError::InvariantViolation(
                "predecessor is not in the ledger",
            ))?
            .clone();
        let (path, directions) = self.store.sibling_path(pred_index);
        debug!(query = %value, predecessor = pred_index, "Non-membership proof created");

        Ok(NonMembershipProof {
            query: value.clone(),
            pre_leaf,
            path,
            directions,
            root: self.root().clone(),
        })
    }

    /// Verify `proof` with this tree's hasher. Does not compare against this tree's root.
    #[must_use]
    pub fn verify_non_membership_proof(&self, proof: &NonMembershipProof) -> bool {
        verify_non_membership_proof(&self.hasher, proof)
    }

    /// Verify `proof` and require that it was made against the current root.
    #[must_use]
    pub fn is_proof_current(&self, proof: &NonMembershipProof) -> bool {
        proof.root == *self.root() && self.verify_non_membership_proof(proof)
    }

    /// Current root hash.
    #[must_use]
    pub fn root(&self) -> &FieldElement {
        self.store.root()
    }

    /// Number of leaves, sentinel included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.ledger.len()
    }

    /// Copy of all leaves in append order.
    #[must_use]
    pub fn leaves(&self) -> Vec<Leaf> {
        self.ledger.leaves().to_vec()
    }

    /// Leaf at append position `index`.
    #[must_use]
    pub fn leaf(&self, index: usize) -> Option<&Leaf> {
        self.ledger.get(index)
    }

    /// Copy of the stored node row at `level`.
    ///
    /// Only positions that were ever written (or padded while writing) are returned.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidLevel`] when `level` is negative or above the tree depth.
    pub fn nodes_at_level(&self, level: i64) -> Result<Vec<FieldElement>, TreeError> {
        usize::try_from(level)
            .ok()
            .and_then(|row| self.store.row(row))
            .map(<[FieldElement]>::to_vec)
            .ok_or(TreeError::InvalidLevel {
                level,
                depth: TREE_DEPTH,
            })
    }

    /// Whether `value` is committed. The sentinel's `0` counts as present.
    #[must_use]
    pub fn contains(&self, value: &FieldElement) -> bool {
        self.ledger.contains(value)
    }

    /// Inserted values in ascending order, following the linked list from the sentinel.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<FieldElement> {
        self.ledger.sorted_values()
    }

    /// The zero-hash table of this tree's hasher.
    #[must_use]
    pub fn zero_hashes(&self) -> &ZeroHashes {
        self.store.zeros()
    }

    /// The hasher the tree was built with.
    #[must_use]
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }
}
