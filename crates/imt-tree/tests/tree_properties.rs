#![allow(missing_docs)]

use imt_core::base::{FieldElement, Hash2, Sha256Hash2};
use imt_tree::{
    Direction, IndexedMerkleTree, Leaf, NonMembershipProof, TREE_DEPTH, TreeError,
    verify_non_membership_proof,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng as _, SeedableRng as _};
use test_utils::{StubHash2, assert_sorted_list, fe, fes};

fn tree_with<H: Hash2>(hasher: H, values: &[u64]) -> IndexedMerkleTree<H> {
    let mut tree = IndexedMerkleTree::new(hasher);
    for value in values {
        tree.insert(*value).expect("insert should succeed");
    }
    tree
}

fn random_values(rng: &mut StdRng, count: usize) -> Vec<u64> {
    let mut values: Vec<u64> = (0..count).map(|_| rng.random_range(1..1_000_000)).collect();
    values.sort_unstable();
    values.dedup();
    values
}

#[test]
fn concrete_scenario() {
    let mut tree = tree_with(Sha256Hash2, &[10, 30, 50]);

    let expectations = [
        (25, Leaf::new(fe!(10), fe!(30), 2)),
        (5, Leaf::new(fe!(0), fe!(10), 1)),
        (100, Leaf::new(fe!(50), fe!(0), 0)),
    ];
    for (query, pre_leaf) in expectations {
        let proof = tree
            .create_non_membership_proof(&fe!(query))
            .expect("proof should be created");
        assert_eq!(proof.pre_leaf, pre_leaf, "predecessor of {query}");
        assert_eq!(proof.path.len(), usize::from(TREE_DEPTH));
        assert_eq!(proof.root, *tree.root());
        assert!(verify_non_membership_proof(&Sha256Hash2, &proof));
    }

    let root = tree.root().clone();
    assert_eq!(tree.insert(30_u64), Err(TreeError::DuplicateValue(fe!(30))));
    assert_eq!(*tree.root(), root);
    assert_eq!(tree.size(), 4);
}

#[test]
fn sorted_list_holds_for_random_orders() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let values = random_values(&mut rng, 64);
        let mut shuffled = values.clone();
        shuffled.shuffle(&mut rng);

        let tree = tree_with(StubHash2, &shuffled);
        let walked = assert_sorted_list(&tree.leaves());
        let expected: Vec<FieldElement> = values.iter().map(|v| fe!(*v)).collect();
        assert_eq!(walked, expected);
        assert_eq!(tree.sorted_values(), expected);
    }
}

#[test]
fn root_is_determined_by_insertion_sequence() {
    let mut rng = StdRng::seed_from_u64(11);
    let values = random_values(&mut rng, 40);

    let reference = tree_with(Sha256Hash2, &values);
    assert_eq!(tree_with(Sha256Hash2, &values).root(), reference.root());

    // Leaves sit at their append position, so the order is part of the commitment.
    let ascending = tree_with(Sha256Hash2, &[10, 30]);
    let descending = tree_with(Sha256Hash2, &[30, 10]);
    assert_ne!(ascending.root(), descending.root());
    assert_eq!(ascending.sorted_values(), descending.sorted_values());
}

#[test]
fn insertion_order_preserves_membership_and_proofs() {
    let mut rng = StdRng::seed_from_u64(13);
    let values = random_values(&mut rng, 40);
    let reference = tree_with(Sha256Hash2, &values);

    for _ in 0..4 {
        let mut shuffled = values.clone();
        shuffled.shuffle(&mut rng);
        let tree = tree_with(Sha256Hash2, &shuffled);
        assert_eq!(tree.sorted_values(), reference.sorted_values());

        for _ in 0..20 {
            let query = rng.random_range(1..1_100_000);
            assert_eq!(tree.contains(&fe!(query)), reference.contains(&fe!(query)));
            if values.binary_search(&query).is_ok() {
                continue;
            }
            let proof = tree
                .create_non_membership_proof(&fe!(query))
                .expect("positive query always has a predecessor");
            assert!(
                verify_non_membership_proof(&Sha256Hash2, &proof),
                "proof for {query} should verify"
            );
        }
        for value in &values {
            assert!(tree.contains(&fe!(*value)));
        }
    }
}

#[test]
fn proofs_verify_for_absent_values() {
    let mut rng = StdRng::seed_from_u64(23);
    let values = random_values(&mut rng, 50);
    let tree = tree_with(StubHash2, &values);

    let mut checked = 0;
    while checked < 200 {
        let query = rng.random_range(1..1_100_000);
        if values.binary_search(&query).is_ok() {
            continue;
        }
        let proof = tree
            .create_non_membership_proof(&fe!(query))
            .expect("positive query always has a predecessor");
        assert!(
            tree.verify_non_membership_proof(&proof),
            "proof for {query} should verify"
        );
        assert!(tree.is_proof_current(&proof));
        checked += 1;
    }
}

#[test]
fn proofs_for_present_values_fail() {
    let values = [3, 17, 40, 41, 900];
    let tree = tree_with(StubHash2, &values);
    for value in values {
        assert!(tree.contains(&fe!(value)));
        let proof = tree
            .create_non_membership_proof(&fe!(value))
            .expect("predecessor exists");
        assert!(!tree.verify_non_membership_proof(&proof));
    }
}

fn sound_proof() -> (IndexedMerkleTree<Sha256Hash2>, NonMembershipProof) {
    let tree = tree_with(Sha256Hash2, &[10, 30, 50, 70, 90]);
    let proof = tree
        .create_non_membership_proof(&fe!(60))
        .expect("proof for 60");
    assert!(verify_non_membership_proof(&Sha256Hash2, &proof));
    (tree, proof)
}

#[test]
fn tampered_proofs_are_rejected() {
    let (_, proof) = sound_proof();

    let mut root = proof.clone();
    root.root = fe!(1);
    assert!(!verify_non_membership_proof(&Sha256Hash2, &root));

    for level in [0, 1, 5, 31] {
        let mut path = proof.clone();
        if let Some(sibling) = path.path.get_mut(level) {
            *sibling = fe!(42);
        }
        assert!(
            !verify_non_membership_proof(&Sha256Hash2, &path),
            "path entry {level}"
        );
    }

    let mut direction = proof.clone();
    if let Some(bit) = direction.directions.first_mut() {
        *bit = match *bit {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };
    }
    assert!(!verify_non_membership_proof(&Sha256Hash2, &direction));

    // Keeping the range check satisfied isolates the hash check.
    let mut val = proof.clone();
    val.pre_leaf.val = fe!(55);
    assert!(!verify_non_membership_proof(&Sha256Hash2, &val));

    let mut next_val = proof.clone();
    next_val.pre_leaf.next_val = fe!(65);
    assert!(!verify_non_membership_proof(&Sha256Hash2, &next_val));

    let mut truncated = proof;
    truncated.path.truncate(usize::from(TREE_DEPTH) - 1);
    truncated.directions.truncate(usize::from(TREE_DEPTH) - 1);
    assert!(!verify_non_membership_proof(&Sha256Hash2, &truncated));
}

#[test]
fn query_moved_out_of_gap_is_rejected() {
    let (_, proof) = sound_proof();

    for query in [50, 70, 71, 49] {
        let mut moved = proof.clone();
        moved.query = fe!(query);
        assert!(
            !verify_non_membership_proof(&Sha256Hash2, &moved),
            "query {query}"
        );
    }
}

#[test]
fn stored_parents_match_children() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut values = random_values(&mut rng, 30);
    values.shuffle(&mut rng);
    let tree = tree_with(StubHash2, &values);
    let zeros = tree.zero_hashes();

    for level in 0..TREE_DEPTH {
        let children = tree.nodes_at_level(i64::from(level)).expect("valid level");
        let parents = tree
            .nodes_at_level(i64::from(level) + 1)
            .expect("valid level");
        let zero = zeros.get(usize::from(level)).expect("zero-hash exists");
        for (index, parent) in parents.iter().enumerate() {
            let left = children.get(index * 2).unwrap_or(zero);
            let right = children.get(index * 2 + 1).unwrap_or(zero);
            assert_eq!(*parent, StubHash2.hash2(left, right), "level {level}");
        }
    }
}

#[test]
fn zero_table_matches_definition() {
    let tree = IndexedMerkleTree::new(StubHash2);
    let zeros = tree.zero_hashes().as_slice();
    assert_eq!(zeros.len(), usize::from(TREE_DEPTH) + 1);
    assert_eq!(zeros.first(), Some(&fe!(0)));
    for pair in zeros.windows(2) {
        assert_eq!(pair[1], StubHash2.hash2(&pair[0], &pair[0]));
    }
}

#[test]
fn state_roundtrip_through_json() {
    let tree = tree_with(Sha256Hash2, &[500, 20, 7_000, 21]);
    let json = serde_json::to_string(&tree.to_state()).expect("serialize state");
    let state = serde_json::from_str(&json).expect("deserialize state");
    let restored = IndexedMerkleTree::from_state(state, Sha256Hash2).expect("rebuild tree");

    assert_eq!(restored.root(), tree.root());
    assert_eq!(restored.size(), tree.size());
    assert_eq!(restored.leaves(), tree.leaves());
    assert_eq!(restored.sorted_values(), fes![20, 21, 500, 7_000]);

    let proof = tree
        .create_non_membership_proof(&fe!(100))
        .expect("proof from original");
    assert!(restored.is_proof_current(&proof));
    let proof = restored
        .create_non_membership_proof(&fe!(100))
        .expect("proof from restored");
    assert!(tree.is_proof_current(&proof));
}

#[test]
fn restored_tree_accepts_further_inserts() {
    let tree = tree_with(StubHash2, &[10, 30]);
    let mut restored =
        IndexedMerkleTree::from_state(tree.to_state(), StubHash2).expect("rebuild tree");
    restored.insert(20_u64).expect("insert after reload");

    let fresh = tree_with(StubHash2, &[10, 30, 20]);
    assert_eq!(restored.root(), fresh.root());
    assert_eq!(
        restored.insert(10_u64),
        Err(TreeError::DuplicateValue(fe!(10)))
    );
}

#[test]
fn large_values_are_supported() {
    let big: FieldElement =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617"
            .parse()
            .expect("valid decimal");
    let mut tree = IndexedMerkleTree::new(Sha256Hash2);
    tree.insert(big.clone()).expect("insert big value");
    tree.insert(u64::MAX).expect("insert u64::MAX");

    let proof = tree
        .create_non_membership_proof(&fe!(u64::MAX - 1))
        .expect("proof below u64::MAX");
    assert!(tree.verify_non_membership_proof(&proof));
    assert_eq!(proof.pre_leaf.val, fe!(0));

    let above: FieldElement =
        "21888242871839275222246405745257275088548364400416034343698204186575808495618"
            .parse()
            .expect("valid decimal");
    let proof = tree
        .create_non_membership_proof(&above)
        .expect("proof above big");
    assert_eq!(proof.pre_leaf.val, big);
    assert!(tree.verify_non_membership_proof(&proof));
}
