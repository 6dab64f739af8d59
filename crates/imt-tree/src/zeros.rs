//! Pre-computed hashes of all-zero subtrees.

#![allow(
    clippy::indexing_slicing,
    reason = "Levels are bounded by the tree depth and the table always has DEPTH + 1 entries"
)]

use imt_core::base::{FieldElement, Hash2};

use crate::core::DEPTH;

/// `zeros[0] = 0` and `zeros[i] = hash2(zeros[i - 1], zeros[i - 1])` for every level up to the
/// root.
///
/// Supplies the value of any node position that was never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroHashes(Vec<FieldElement>);

impl ZeroHashes {
    /// Compute the table for `hasher`.
    #[must_use]
    pub fn new<H: Hash2>(hasher: &H) -> Self {
        let mut zeros = Vec::with_capacity(DEPTH.saturating_add(1));
        zeros.push(FieldElement::zero());
        for level in 0..DEPTH {
            let prev = &zeros[level];
            let next = hasher.hash2(prev, prev);
            zeros.push(next);
        }
        Self(zeros)
    }

    /// Zero-hash at `level`, or `None` above the root level.
    #[must_use]
    pub fn get(&self, level: usize) -> Option<&FieldElement> {
        self.0.get(level)
    }

    /// Root of an empty tree.
    #[must_use]
    pub fn empty_root(&self) -> &FieldElement {
        &self.0[DEPTH]
    }

    /// All levels, leaf level first.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldElement] {
        &self.0
    }

    pub(crate) fn at(&self, level: usize) -> &FieldElement {
        &self.0[level]
    }
}

#[cfg(test)]
mod tests {
    use imt_core::base::Sha256Hash2;
    use test_utils::StubHash2;

    use super::*;

    #[test]
    fn table_is_iterated_self_hash() {
        let zeros = ZeroHashes::new(&StubHash2);
        assert_eq!(zeros.as_slice().len(), DEPTH + 1);
        assert_eq!(zeros.get(0), Some(&FieldElement::zero()));
        for pair in zeros.as_slice().windows(2) {
            let [prev, next] = pair else {
                unreachable!("windows(2) yields pairs");
            };
            assert_eq!(*next, StubHash2.hash2(prev, prev));
        }
        assert_eq!(zeros.empty_root(), zeros.at(DEPTH));
        assert_eq!(zeros.get(DEPTH + 1), None);
    }

    #[test]
    fn first_levels_match_hasher() {
        let zeros = ZeroHashes::new(&Sha256Hash2);
        let zero = FieldElement::zero();
        let level1 = Sha256Hash2.hash2(&zero, &zero);
        assert_eq!(zeros.at(1), &level1);
        assert_eq!(zeros.at(2), &Sha256Hash2.hash2(&level1, &level1));
    }

    #[test]
    fn deterministic_per_hasher() {
        assert_eq!(ZeroHashes::new(&StubHash2), ZeroHashes::new(&StubHash2));
        assert_ne!(
            ZeroHashes::new(&StubHash2).empty_root(),
            ZeroHashes::new(&Sha256Hash2).empty_root()
        );
    }
}
