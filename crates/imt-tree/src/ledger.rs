//! Leaf ledger: the append-only leaf array and its value ordering.

use std::collections::BTreeMap;

use imt_core::base::{FieldElement, LeafIndex};
use imt_core::schema::state::Leaf;

use crate::core::{MAX_LEAVES, TreeError};

/// Leaves in append order plus a value to position index.
///
/// A leaf's position never changes once appended; it is also its position at level 0 of the
/// node store. The ordering index answers predecessor queries without scanning the leaves.
#[derive(Debug, Clone)]
pub(crate) struct LeafLedger {
    leaves: Vec<Leaf>,
    order: BTreeMap<FieldElement, usize>,
}

impl LeafLedger {
    /// A ledger holding only the sentinel.
    pub(crate) fn new() -> Self {
        let sentinel = Leaf::sentinel();
        let order = BTreeMap::from([(sentinel.val.clone(), 0)]);
        Self {
            leaves: vec![sentinel],
            order,
        }
    }

    /// Rebuild the ordering index over a deserialized leaf array.
    ///
    /// Leaf contents are taken as-is. Only problems that would make the index itself
    /// ambiguous are rejected.
    pub(crate) fn from_leaves(leaves: Vec<Leaf>) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::MissingSentinel);
        }
        if !u64::try_from(leaves.len()).is_ok_and(|len| len <= MAX_LEAVES) {
            return Err(TreeError::CapacityExceeded(MAX_LEAVES));
        }

        let mut order = BTreeMap::new();
        for (index, leaf) in leaves.iter().enumerate() {
            if order.insert(leaf.val.clone(), index).is_some() {
                return Err(TreeError::DuplicateValue(leaf.val.clone()));
            }
        }
        Ok(Self { leaves, order })
    }

    pub(crate) fn len(&self) -> usize {
        self.leaves.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Leaf> {
        self.leaves.get(index)
    }

    pub(crate) fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub(crate) fn contains(&self, value: &FieldElement) -> bool {
        self.order.contains_key(value)
    }

    /// Position of the leaf with the greatest value strictly below `value`.
    pub(crate) fn find_predecessor(&self, value: &FieldElement) -> Option<usize> {
        self.order
            .range(..value)
            .next_back()
            .map(|(_, index)| *index)
    }

    /// Splice `value` into the sorted list.
    ///
    /// Returns `(predecessor, new)` positions; both leaves changed and need their hash paths
    /// refreshed. Nothing is modified when an error is returned.
    pub(crate) fn insert(&mut self, value: FieldElement) -> Result<(usize, usize), TreeError> {
        if value.is_zero() {
            return Err(TreeError::ReservedValue);
        }
        if self.contains(&value) {
            return Err(TreeError::DuplicateValue(value));
        }

        let new_index = self.leaves.len();
        let new_idx = LeafIndex::try_from(new_index)
            .ok()
            .filter(|idx| *idx < MAX_LEAVES)
            .ok_or(TreeError::CapacityExceeded(MAX_LEAVES))?;

        let pred_index = self
            .find_predecessor(&value)
            .ok_or(TreeError::InvariantViolation(
                "no predecessor for a positive value",
            ))?;
        let pred = self
            .leaves
            .get_mut(pred_index)
            .ok_or(TreeError::InvariantViolation(
                "ordering index points past the leaf array",
            ))?;

        let next_val = std::mem::replace(&mut pred.next_val, value.clone());
        let next_idx = std::mem::replace(&mut pred.next_idx, new_idx);
        self.leaves.push(Leaf::new(value.clone(), next_val, next_idx));
        self.order.insert(value, new_index);

        Ok((pred_index, new_index))
    }

    /// Committed values in ascending order, found by walking the list from the sentinel.
    ///
    /// The sentinel itself is not included. The walk stops after `len()` steps so that a
    /// corrupted state with a cycle cannot loop forever.
    pub(crate) fn sorted_values(&self) -> Vec<FieldElement> {
        let mut values = Vec::with_capacity(self.leaves.len().saturating_sub(1));
        let mut current = self.leaves.first();
        while let Some(leaf) = current {
            if leaf.is_last() || values.len() >= self.leaves.len() {
                break;
            }
            values.push(leaf.next_val.clone());
            current = usize::try_from(leaf.next_idx)
                .ok()
                .and_then(|idx| self.leaves.get(idx));
        }
        values
    }
}
