//! Single rotations.
//!
//! ```text
//!         y                         x
//!        / \     rotate_right      / \
//!       x   C    ------------>    A   y
//!      / \       <------------       / \
//!     A   T       rotate_left       T   C
//! ```
//!
//! Both rotations touch only `x`, `y` and `T`. The caller relinks the returned
//! subtree root into whatever held the old one.

use super::handle::Handle;
use super::node::Dir;
use super::raw_os_tree::RawOSTree;
use crate::counter::{Counter, Step};

impl RawOSTree {
    /// Promotes the left child of `y` and returns it as the new local root.
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child.
    pub(crate) fn rotate_right<C: Counter>(&mut self, y: Handle, counter: &mut C) -> Handle {
        self.rotate(y, Dir::Left, counter)
    }

    /// Promotes the right child of `x` and returns it as the new local root.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child.
    pub(crate) fn rotate_left<C: Counter>(&mut self, x: Handle, counter: &mut C) -> Handle {
        self.rotate(x, Dir::Right, counter)
    }

    // Promotes the `dir` child of `top`. A right rotation promotes the left child.
    fn rotate<C: Counter>(&mut self, top: Handle, dir: Dir, counter: &mut C) -> Handle {
        let pivot = self
            .node(top)
            .child(dir)
            .expect("`RawOSTree::rotate()` - node has no child to promote!");
        let inner = self.node(pivot).child(!dir);
        let top_parent = self.node(top).parent();

        self.node_mut(pivot).set_child(!dir, Some(top));
        self.node_mut(top).set_child(dir, inner);
        self.node_mut(pivot).set_parent(top_parent);
        self.node_mut(top).set_parent(Some(pivot));
        for _ in 0..4 {
            counter.record(Step::Link);
        }
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(top));
            counter.record(Step::Link);
        }

        // The demoted node is now the pivot's child, so it is updated first.
        self.update_metrics(Some(top), counter);
        self.update_metrics(Some(pivot), counter);
        counter.record(Step::Rotation);

        log::trace!(
            "rotated {} at key {}: key {} promoted",
            if dir == Dir::Left { "right" } else { "left" },
            self.node(top).key(),
            self.node(pivot).key()
        );
        pivot
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Key;
    use alloc::vec::Vec;

    fn in_order(tree: &RawOSTree, node: Option<Handle>, out: &mut Vec<Key>) {
        if let Some(h) = node {
            in_order(tree, tree.node(h).left(), out);
            out.push(tree.node(h).key());
            in_order(tree, tree.node(h).right(), out);
        }
    }

    fn keys(tree: &RawOSTree) -> Vec<Key> {
        let mut out = Vec::new();
        in_order(tree, tree.root(), &mut out);
        out
    }

    #[test]
    fn rotate_right_at_root() {
        // 4 -> (2 -> 1, 3), (6 -> 5, 7)
        let mut tree = RawOSTree::build(1, 7, &mut ()).unwrap();
        let root = tree.root().unwrap();

        let new_root = tree.rotate_right(root, &mut ());
        tree.set_root(Some(new_root));

        assert_eq!(tree.node(new_root).key(), 2);
        assert_eq!(tree.node(new_root).parent(), None);
        assert_eq!(tree.node(root).parent(), Some(new_root));
        assert_eq!(tree.node(new_root).size(), 7);
        assert_eq!(tree.node(new_root).height(), 4);
        assert_eq!(tree.node(root).size(), 5);
        assert_eq!(tree.node(root).height(), 3);

        // The old inner child (3) moved under the demoted root.
        let moved = tree.node(root).left().unwrap();
        assert_eq!(tree.node(moved).key(), 3);
        assert_eq!(tree.node(moved).parent(), Some(root));
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn rotations_are_inverse() {
        let mut tree = RawOSTree::build(1, 7, &mut ()).unwrap();
        let root = tree.root().unwrap();

        let promoted = tree.rotate_left(root, &mut ());
        tree.set_root(Some(promoted));
        let restored = tree.rotate_right(promoted, &mut ());
        tree.set_root(Some(restored));

        assert_eq!(restored, root);
        tree.validate_invariants();
    }

    #[test]
    fn rotation_of_inner_node_keeps_parent_link() {
        let mut tree = RawOSTree::build(1, 7, &mut ()).unwrap();
        let root = tree.root().unwrap();
        let left = tree.node(root).left().unwrap();

        let promoted = tree.rotate_left(left, &mut ());
        tree.node_mut(root).set_child(Dir::Left, Some(promoted));

        assert_eq!(tree.node(promoted).key(), 3);
        assert_eq!(tree.node(promoted).parent(), Some(root));
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn rotation_counts() {
        let mut tree = RawOSTree::build(1, 7, &mut ()).unwrap();
        let root = tree.root().unwrap();
        let mut counts = crate::StepCounts::new();

        let new_root = tree.rotate_right(root, &mut counts);
        tree.set_root(Some(new_root));

        assert_eq!(counts.rotations, 1);
        assert_eq!(counts.metric_updates, 2);
        assert_eq!(counts.links, 5);
    }

    #[test]
    #[should_panic(expected = "node has no child to promote")]
    fn rotate_leaf_panics() {
        let mut tree = RawOSTree::build(1, 1, &mut ()).unwrap();
        let root = tree.root().unwrap();
        tree.rotate_left(root, &mut ());
    }
}
