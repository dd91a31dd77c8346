use osavl_tree::{BuildError, Key, NodeRef, OSAvlTree, Rank, StepCounts};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn keys(tree: &OSAvlTree) -> Vec<Key> {
    tree.iter().copied().collect()
}

/// Checks the AVL and size invariants through the public API alone.
fn assert_balanced(tree: &OSAvlTree) {
    fn check(tree: &OSAvlTree, node: NodeRef, parent: Option<NodeRef>) {
        assert_eq!(tree.parent(node), parent, "parent link of {node:?}");
        assert!(tree.balance_of(node).abs() <= 1, "{node:?} is unbalanced");

        let (left, right) = tree.children(node);
        let child_sizes: usize = [left, right].into_iter().flatten().map(|c| tree.size_of(c)).sum();
        assert_eq!(tree.size_of(node), 1 + child_sizes, "size of {node:?}");

        for child in [left, right].into_iter().flatten() {
            check(tree, child, Some(node));
        }
    }

    if let Some(root) = tree.root() {
        check(tree, root, None);
        assert_eq!(tree.size_of(root), tree.len());
    }
    tree.assert_invariants();
}

fn expected_height(n: usize) -> usize {
    (n.ilog2() + 1) as usize
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn build_zero_is_empty() {
    let tree = OSAvlTree::build(0).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.to_string(), "");
    assert_balanced(&tree);
}

#[test]
fn build_eight() {
    let tree = OSAvlTree::build(8).unwrap();
    assert_balanced(&tree);

    assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(tree.height(), 4);
    assert_eq!(tree.key(tree.select(1).unwrap()), Some(&1));
    assert_eq!(tree.key(tree.select(8).unwrap()), Some(&8));
    assert_eq!(tree.key(tree.first().unwrap()), Some(&1));
    assert_eq!(tree.key(tree.last().unwrap()), Some(&8));
}

#[test]
fn build_one() {
    let tree = OSAvlTree::build(1).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(tree.size_of(root), 1);
    assert_eq!(tree.height_of(root), 1);
    assert_eq!(tree.balance_of(root), 0);
    assert_eq!(tree.children(root), (None, None));
}

#[test]
fn build_rejects_unaddressable_range() {
    assert!(matches!(OSAvlTree::from_range(0..=Key::MAX), Err(BuildError::TooManyKeys { .. })));
    assert!(matches!(OSAvlTree::from_range(Key::MIN..=Key::MAX), Err(BuildError::TooManyKeys { .. })));
}

#[test]
fn build_error_messages() {
    let err = OSAvlTree::from_range(0..=Key::MAX).unwrap_err();
    assert!(err.to_string().starts_with("key range holds more than"));
}

#[test]
fn reversed_range_is_empty() {
    #[allow(clippy::reversed_empty_ranges)]
    let tree = OSAvlTree::from_range(5..=1).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn dump_lists_key_size_height() {
    let tree = OSAvlTree::build(4).unwrap();
    let expected = "\
2 (s=4, h=3)
  1 (s=1, h=1)
  3 (s=2, h=2)
    4 (s=1, h=1)
";
    assert_eq!(tree.to_string(), expected);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3, 4}");
}

// ─── Rank select ─────────────────────────────────────────────────────────────

#[test]
fn select_out_of_range() {
    let tree = OSAvlTree::build(5).unwrap();
    assert!(tree.select(0).is_none());
    assert!(tree.select(6).is_none());
    assert!(tree.select(usize::MAX).is_none());
    assert!(OSAvlTree::new().select(1).is_none());
}

#[test]
fn index_by_rank() {
    let tree = OSAvlTree::from_range(100..=109).unwrap();
    assert_eq!(tree[Rank(1)], 100);
    assert_eq!(tree[Rank(10)], 109);
}

#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_by_rank_zero_panics() {
    let tree = OSAvlTree::build(3).unwrap();
    let _key: Key = tree[Rank(0)];
}

// ─── Rank delete ─────────────────────────────────────────────────────────────

#[test]
fn delete_rank_five_of_eight() {
    let mut tree = OSAvlTree::build(8).unwrap();
    let node = tree.select(5).unwrap();

    assert_eq!(tree.remove(node), Some(5));
    assert_balanced(&tree);
    assert_eq!(keys(&tree), vec![1, 2, 3, 4, 6, 7, 8]);
    assert_eq!(tree.size_of(tree.root().unwrap()), 7);
}

#[test]
fn delete_only_node() {
    let mut tree = OSAvlTree::build(1).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(tree.remove(root), Some(1));
    assert_eq!(tree.root(), None);
    assert!(tree.select(1).is_none());
    assert!(!tree.contains(root));
    assert_eq!(tree.key(root), None);
    assert_eq!(tree.size_of(root), 0);
}

#[test]
fn delete_stale_node_is_a_no_op() {
    let mut tree = OSAvlTree::build(8).unwrap();
    let leaf = tree.select(1).unwrap();
    tree.remove(leaf);
    let before = tree.to_string();

    assert_eq!(tree.remove(leaf), None);
    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.rank_of(leaf), None);
}

#[test]
fn delete_two_child_node_reuses_handle() {
    let mut tree = OSAvlTree::build(7).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(tree.remove(root), Some(4));
    assert_balanced(&tree);
    assert_eq!(tree.key(root), Some(&5));
    assert_eq!(tree.rank_of(root), Some(4));
}

#[test]
fn remove_by_rank_drains_in_order() {
    let mut tree = OSAvlTree::build(50).unwrap();
    let mut removed = Vec::new();
    while let Some(key) = tree.remove_by_rank(1) {
        assert_balanced(&tree);
        removed.push(key);
    }

    assert_eq!(removed, (1..=50).collect::<Vec<_>>());
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn clear_releases_every_node() {
    let mut tree = OSAvlTree::build(16).unwrap();
    let some = tree.select(3).unwrap();
    tree.remove_by_rank(9);
    tree.clear();

    assert!(tree.is_empty());
    assert!(!tree.contains(some));
    assert_balanced(&tree);
}

#[test]
fn clone_is_independent() {
    let mut tree = OSAvlTree::build(10).unwrap();
    let copy = tree.clone();
    tree.remove_by_rank(3);

    assert_eq!(copy.len(), 10);
    assert_eq!(keys(&copy), (1..=10).collect::<Vec<_>>());
    assert_eq!(tree.len(), 9);
}

// ─── Counting ────────────────────────────────────────────────────────────────

#[test]
fn counted_and_plain_operations_agree() {
    let mut counts = StepCounts::new();
    let mut counted = OSAvlTree::build_counted(100, &mut counts).unwrap();
    let mut plain = OSAvlTree::build(100).unwrap();
    assert_eq!(counts.metric_updates, 100);

    for rank in [50, 1, 98, 20, 33] {
        assert_eq!(counted.remove_by_rank_counted(rank, &mut counts), plain.remove_by_rank(rank));
    }
    assert_eq!(keys(&counted), keys(&plain));
    assert!(counts.visits > 0);
    assert!(counts.links > 0);
}

#[test]
fn select_cost_is_logarithmic() {
    let tree = OSAvlTree::build(4096).unwrap();
    for rank in [1, 2048, 4096] {
        let mut counts = StepCounts::new();
        tree.select_counted(rank, &mut counts).unwrap();
        assert!(counts.visits <= tree.height() as u64, "rank {rank} visited {} nodes", counts.visits);
    }
}

#[test]
fn single_total_counter() {
    let mut total = 0u64;
    let mut tree = OSAvlTree::build_counted(32, &mut total).unwrap();
    let after_build = total;
    tree.remove_by_rank_counted(16, &mut total);

    assert!(after_build > 0);
    assert!(total > after_build);
}

// ─── Randomized ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn built_tree_shape(n in 1usize..3_000) {
        let tree = OSAvlTree::build(n).unwrap();
        prop_assert_eq!(tree.len(), n);
        prop_assert_eq!(tree.height(), expected_height(n));
        prop_assert_eq!(tree.iter().len(), n);
        prop_assert!(tree.iter().copied().eq(1..=n as Key));
        tree.assert_invariants();
    }

    #[test]
    fn select_matches_sorted_model(n in 1usize..400, removals in prop::collection::vec(any::<usize>(), 0..200)) {
        let mut tree = OSAvlTree::build(n).unwrap();
        let mut model: Vec<Key> = (1..=n as Key).collect();

        for pick in removals {
            if model.is_empty() {
                break;
            }
            let rank = 1 + pick % model.len();
            prop_assert_eq!(tree.remove_by_rank(rank), Some(model.remove(rank - 1)));
        }

        for (i, key) in model.iter().enumerate() {
            let node = tree.select(i + 1).unwrap();
            prop_assert_eq!(tree.key(node), Some(key));
            prop_assert_eq!(tree.rank_of(node), Some(i + 1));
        }
        prop_assert!(tree.select(model.len() + 1).is_none());
    }

    #[test]
    fn drain_in_arbitrary_order_stays_balanced(n in 1usize..250, picks in prop::collection::vec(any::<usize>(), 250)) {
        let mut tree = OSAvlTree::build(n).unwrap();
        let mut model: Vec<Key> = (1..=n as Key).collect();

        for pick in picks.into_iter().take(n) {
            let rank = 1 + pick % model.len();
            let node = tree.select(rank).unwrap();
            prop_assert_eq!(tree.remove(node), Some(model.remove(rank - 1)));
            assert_balanced(&tree);
            prop_assert_eq!(keys(&tree), model.clone());
        }

        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.root(), None);
    }
}
