//! Sparse per-level node storage with incremental path recomputation.

#![allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "Node positions use fixed-depth index math; levels are bounded by DEPTH"
)]

use imt_core::base::{FieldElement, Hash2};
use imt_core::schema::proof::Direction;
use imt_core::schema::state::Leaf;

use crate::core::{DEPTH, TreeError};
use crate::zeros::ZeroHashes;

/// Stored node hashes, one growable row per level.
///
/// A row only extends as far as the highest index written at its level. Reads past the end
/// of a row, and filler entries created while growing it, are the level's zero-hash.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore {
    rows: Vec<Vec<FieldElement>>,
    zeros: ZeroHashes,
}

impl NodeStore {
    pub(crate) fn new(zeros: ZeroHashes) -> Self {
        Self {
            rows: vec![Vec::new(); DEPTH + 1],
            zeros,
        }
    }

    /// Adopt rows loaded from a state document without checking their hashes.
    pub(crate) fn from_rows(
        rows: Vec<Vec<FieldElement>>,
        zeros: ZeroHashes,
    ) -> Result<Self, TreeError> {
        if rows.len() != DEPTH + 1 {
            return Err(TreeError::DepthMismatch {
                expected: DEPTH + 1,
                found: rows.len(),
            });
        }
        Ok(Self { rows, zeros })
    }

    pub(crate) fn zeros(&self) -> &ZeroHashes {
        &self.zeros
    }

    pub(crate) fn rows(&self) -> &[Vec<FieldElement>] {
        &self.rows
    }

    /// The stored row at `level`, if the level exists.
    pub(crate) fn row(&self, level: usize) -> Option<&[FieldElement]> {
        self.rows.get(level).map(Vec::as_slice)
    }

    pub(crate) fn get(&self, level: usize, index: usize) -> &FieldElement {
        self.rows[level]
            .get(index)
            .unwrap_or_else(|| self.zeros.at(level))
    }

    pub(crate) fn set(&mut self, level: usize, index: usize, hash: FieldElement) {
        let row = &mut self.rows[level];
        if index >= row.len() {
            row.resize(index + 1, self.zeros.at(level).clone());
        }
        row[index] = hash;
    }

    pub(crate) fn root(&self) -> &FieldElement {
        self.get(DEPTH, 0)
    }

    /// Rehash `leaf` at `leaf_index` and every ancestor up to the root.
    pub(crate) fn recompute_path_from<H: Hash2>(
        &mut self,
        hasher: &H,
        leaf_index: usize,
        leaf: &Leaf,
    ) {
        let mut index = leaf_index;
        let mut node = hasher.hash2(&leaf.val, &leaf.next_val);
        self.set(0, index, node.clone());

        for level in 0..DEPTH {
            let sibling = self.get(level, index ^ 1);
            node = match Direction::of_index(index) {
                Direction::Left => hasher.hash2(&node, sibling),
                Direction::Right => hasher.hash2(sibling, &node),
            };
            index /= 2;
            self.set(level + 1, index, node.clone());
        }
    }

    /// Sibling hash and direction bit for each level below the root.
    pub(crate) fn sibling_path(&self, leaf_index: usize) -> (Vec<FieldElement>, Vec<Direction>) {
        let mut path = Vec::with_capacity(DEPTH);
        let mut directions = Vec::with_capacity(DEPTH);
        let mut index = leaf_index;
        for level in 0..DEPTH {
            path.push(self.get(level, index ^ 1).clone());
            directions.push(Direction::of_index(index));
            index /= 2;
        }
        (path, directions)
    }
}
