//! Shared test utilities for the workspace.

use imt_core::base::{FieldElement, Hash2};
use imt_core::schema::state::Leaf;
use num_bigint::BigUint;

/// Helper macro to create a [`FieldElement`] from a `u64` expression.
#[macro_export]
macro_rules! fe {
    ($v:expr) => {{
        let v: u64 = $v;
        ::imt_core::base::FieldElement::from(v)
    }};
}

/// Helper macro to create a vector of [`FieldElement`]s, in the given order.
#[macro_export]
macro_rules! fes {
    ($($v:expr),* $(,)?) => {{
        vec![$( $crate::fe!($v) ),*]
    }};
}

/// A cheap, deterministic stand-in hash: `(3a + 5b + ab + 7) mod (2^61 - 1)`.
///
/// Ordered (swapping inputs changes the output) and nonzero on `(0, 0)`. The product term
/// keeps it non-linear, so leaves swapped between positions change the root. Not collision
/// resistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StubHash2;

/// The Mersenne prime `2^61 - 1`.
const STUB_MODULUS: u64 = 2_305_843_009_213_693_951;

impl Hash2 for StubHash2 {
    #[allow(
        clippy::arithmetic_side_effects,
        reason = "BigUint arithmetic is exact and the modulus is a nonzero constant"
    )]
    fn hash2(&self, left: &FieldElement, right: &FieldElement) -> FieldElement {
        let (a, b) = (left.as_biguint(), right.as_biguint());
        let mixed = a * 3_u32 + b * 5_u32 + a * b + 7_u32;
        FieldElement::from(mixed % BigUint::from(STUB_MODULUS))
    }
}

/// Walk the linked list from the sentinel and assert it is strictly increasing.
///
/// Also asserts that every leaf is reached exactly once. Returns the walked values without
/// the sentinel.
///
/// # Panics
/// Panics if the list is empty, cyclic, unsorted, or leaves some leaf unreachable.
#[must_use = "the walked values are usually compared against an expectation"]
pub fn assert_sorted_list(leaves: &[Leaf]) -> Vec<FieldElement> {
    let sentinel = leaves.first().expect("leaf list must contain the sentinel");
    assert!(sentinel.val.is_zero(), "leaf 0 must be the sentinel");

    let mut values = Vec::with_capacity(leaves.len());
    let mut current = sentinel;
    while !current.is_last() {
        assert!(
            values.len() < leaves.len(),
            "linked list does not terminate"
        );
        let next_index = usize::try_from(current.next_idx).expect("index fits in usize");
        let next = leaves
            .get(next_index)
            .expect("next_idx must point at an existing leaf");
        assert_eq!(next.val, current.next_val, "next_val disagrees with next leaf");
        assert!(next.val > current.val, "list is not strictly increasing");
        values.push(next.val.clone());
        current = next;
    }
    assert_eq!(
        values.len().checked_add(1),
        Some(leaves.len()),
        "some leaves are not reachable from the sentinel"
    );
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_hash_is_ordered_and_nonzero() {
        assert_eq!(StubHash2.hash2(&fe!(0), &fe!(0)), fe!(7));
        assert_eq!(StubHash2.hash2(&fe!(1), &fe!(2)), fe!(22));
        assert_eq!(StubHash2.hash2(&fe!(2), &fe!(1)), fe!(20));
        assert_ne!(
            StubHash2.hash2(&fe!(1), &fe!(2)),
            StubHash2.hash2(&fe!(2), &fe!(1))
        );
    }

    #[test]
    fn stub_hash_reduces() {
        let out = StubHash2.hash2(&fe!(STUB_MODULUS), &fe!(0));
        assert_eq!(out, fe!(7));
    }

    #[test]
    fn stub_hash_separates_swapped_leaves() {
        // Leaves of 10, 30 inserted in either order, padded with an empty slot.
        let subtree = |leaves: [(u64, u64); 3]| {
            let [a, b, c] = leaves.map(|(val, next)| StubHash2.hash2(&fe!(val), &fe!(next)));
            let left = StubHash2.hash2(&a, &b);
            let right = StubHash2.hash2(&c, &fe!(0));
            StubHash2.hash2(&left, &right)
        };
        let ascending = subtree([(0, 10), (10, 30), (30, 0)]);
        let descending = subtree([(0, 10), (30, 0), (10, 30)]);
        assert_ne!(ascending, descending);
    }

    #[test]
    fn walks_valid_list() {
        let leaves = vec![
            Leaf::new(fe!(0), fe!(3), 2),
            Leaf::new(fe!(9), fe!(0), 0),
            Leaf::new(fe!(3), fe!(9), 1),
        ];
        assert_eq!(assert_sorted_list(&leaves), fes![3, 9]);
    }

    #[test]
    #[should_panic(expected = "not strictly increasing")]
    fn rejects_unsorted_list() {
        let leaves = vec![
            Leaf::new(fe!(0), fe!(9), 1),
            Leaf::new(fe!(9), fe!(3), 2),
            Leaf::new(fe!(3), fe!(0), 0),
        ];
        let _ = assert_sorted_list(&leaves);
    }
}
