use super::handle::Handle;
use super::node::Dir;
use super::raw_os_tree::RawOSTree;
use crate::Key;
use crate::counter::{Counter, Step};

impl RawOSTree {
    /// Removes the key held by `target` and rebalances the tree.
    ///
    /// Returns the removed key, or `None` if `target` is not in the tree. When
    /// `target` has two children its handle stays valid and takes over its
    /// successor's key; the successor's node is the one released.
    pub(crate) fn remove<C: Counter>(&mut self, target: Handle, counter: &mut C) -> Option<Key> {
        counter.record(Step::Compare);
        let node = self.try_node(target)?;
        let removed = node.key();

        counter.record(Step::Compare);
        if let (Some(_), Some(right)) = (node.left(), node.right()) {
            let successor = self.leftmost(right, counter);
            let successor_key = self.node(successor).key();
            self.node_mut(target).set_key(successor_key);
            counter.record(Step::Link);

            log::debug!("removing key {removed}: replaced by successor {successor_key}");
            // The successor has no left child, so this takes the splice path.
            self.remove(successor, counter);
        } else {
            log::debug!("removing key {removed}");
            let rebalance_from = self.splice_out(target, counter);
            self.rebalance_from(rebalance_from, counter);
        }

        Some(removed)
    }

    // Unlinks a node with at most one child, lifting that child into its place.
    // Returns the former parent, where rebalancing starts.
    fn splice_out<C: Counter>(&mut self, target: Handle, counter: &mut C) -> Option<Handle> {
        let node = self.node(target);
        let child = node.left().or(node.right());
        let parent = node.parent();

        self.replace_child_or_set_root(parent, target, child, counter);
        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
            counter.record(Step::Link);
        }

        self.release(target);
        parent
    }

    // Walks from `start` to the root, refreshing metrics and rotating wherever
    // the balance factor leaves [-1, 1].
    fn rebalance_from<C: Counter>(&mut self, start: Option<Handle>, counter: &mut C) {
        let mut current = start;

        while let Some(node) = current {
            counter.record(Step::Visit);
            let parent = self.node(node).parent();

            self.update_metrics(Some(node), counter);
            let balance = self.balance(Some(node));

            counter.record(Step::Compare);
            let subtree_root = if balance > 1 {
                let left = self.node(node).left();
                counter.record(Step::Compare);
                // A balanced child takes the single rotation.
                if self.balance(left) < 0 {
                    let left = left.expect("left-heavy node has a left child");
                    let promoted = self.rotate_left(left, counter);
                    self.node_mut(node).set_child(Dir::Left, Some(promoted));
                    counter.record(Step::Link);
                }
                self.rotate_right(node, counter)
            } else if balance < -1 {
                let right = self.node(node).right();
                counter.record(Step::Compare);
                if self.balance(right) > 0 {
                    let right = right.expect("right-heavy node has a right child");
                    let promoted = self.rotate_right(right, counter);
                    self.node_mut(node).set_child(Dir::Right, Some(promoted));
                    counter.record(Step::Link);
                }
                self.rotate_left(node, counter)
            } else {
                node
            };

            if subtree_root != node {
                log::trace!("rebalanced subtree at key {} (balance {balance})", self.node(subtree_root).key());
            }

            self.replace_child_or_set_root(parent, node, Some(subtree_root), counter);
            self.node_mut(subtree_root).set_parent(parent);
            counter.record(Step::Link);

            current = parent;
        }
    }

    // Points the slot of `parent` that holds `old_child` at `new_child`, or
    // replaces the root when `parent` is absent. `new_child`'s parent link is
    // left to the caller.
    fn replace_child_or_set_root<C: Counter>(
        &mut self,
        parent: Option<Handle>,
        old_child: Handle,
        new_child: Option<Handle>,
        counter: &mut C,
    ) {
        counter.record(Step::Link);
        match parent {
            Some(parent) => {
                let dir = self
                    .node(parent)
                    .dir_of(old_child)
                    .expect("`RawOSTree::replace_child_or_set_root()` - `old_child` is not a child of `parent`!");
                self.node_mut(parent).set_child(dir, new_child);
            }
            None => self.set_root(new_child),
        }
    }
}
