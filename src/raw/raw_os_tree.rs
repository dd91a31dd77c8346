use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::max;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Dir, Node};
use crate::Key;
use crate::counter::{Counter, Step};
use crate::error::BuildError;

/// The core AVL tree implementation backing `OSAvlTree`.
///
/// Every link (left, right, parent) is a handle into `nodes`; `None` is the
/// absent sentinel.
#[derive(Clone)]
pub(crate) struct RawOSTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl RawOSTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree contains no nodes.
    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a handle to the root node, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    /// Returns the node behind `handle`, or `None` if it has been removed.
    pub(crate) fn try_node(&self, handle: Handle) -> Option<&Node> {
        self.nodes.try_get(handle)
    }

    /// Returns true if `handle` refers to a node currently in the tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    /// Releases the node behind `handle`. Links to it must already be gone.
    pub(crate) fn release(&mut self, handle: Handle) {
        self.nodes.free(handle);
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Tears down the whole tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // ─── Metric accessors ───────────────────────────────────────────────────

    /// Stored height of `node`, 0 when absent.
    #[inline]
    pub(crate) fn height(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |h| self.nodes.get(h).height())
    }

    /// Stored subtree size of `node`, 0 when absent.
    #[inline]
    pub(crate) fn size(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.nodes.get(h).size())
    }

    /// `height(left) - height(right)`, 0 when absent.
    #[inline]
    pub(crate) fn balance(&self, node: Option<Handle>) -> i16 {
        node.map_or(0, |h| {
            let node = self.nodes.get(h);
            i16::from(self.height(node.left())) - i16::from(self.height(node.right()))
        })
    }

    // ─── Metric updater ─────────────────────────────────────────────────────

    /// Recomputes the height and size of `node` from its children, whose metrics
    /// must already be correct.
    pub(crate) fn update_metrics<C: Counter>(&mut self, node: Option<Handle>, counter: &mut C) {
        let Some(handle) = node else {
            return;
        };

        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left(), node.right())
        };
        let height = 1 + max(self.height(left), self.height(right));
        let size = 1 + self.size(left) + self.size(right);
        self.nodes.get_mut(handle).set_metrics(size, height);
        counter.record(Step::MetricUpdate);
    }

    // ─── Bulk builder ───────────────────────────────────────────────────────

    /// Builds a perfectly balanced tree holding every key in `start..=end`.
    ///
    /// An empty range (`start > end`) yields an empty tree.
    pub(crate) fn build<C: Counter>(start: Key, end: Key, counter: &mut C) -> Result<Self, BuildError> {
        if start > end {
            return Ok(Self::new());
        }

        let too_many = BuildError::TooManyKeys { max: Handle::MAX };
        let span = end.checked_sub(start).ok_or(too_many.clone())?;
        let len = usize::try_from(span)
            .ok()
            .and_then(|span| span.checked_add(1))
            .filter(|&len| len <= Handle::MAX)
            .ok_or(too_many)?;

        let nodes = Arena::try_with_capacity(len).map_err(|source| BuildError::Alloc { len, source })?;
        let mut tree = Self { nodes, root: None };
        tree.root = tree.build_range(start, end, None, counter);

        log::debug!("built tree over {start}..={end}: {len} nodes, height {}", tree.height(tree.root));
        Ok(tree)
    }

    // Recursion depth is bounded by the height of the result, floor(log2(n)) + 1.
    fn build_range<C: Counter>(&mut self, start: Key, end: Key, parent: Option<Handle>, counter: &mut C) -> Option<Handle> {
        counter.record(Step::Compare);
        if start > end {
            return None;
        }

        let mid = start + (end - start) / 2;
        let handle = self.nodes.alloc(Node::new(mid, parent));
        counter.record(Step::Visit);

        let left = if mid > start {
            self.build_range(start, mid - 1, Some(handle), counter)
        } else {
            None
        };
        let right = if mid < end {
            self.build_range(mid + 1, end, Some(handle), counter)
        } else {
            None
        };

        let node = self.nodes.get_mut(handle);
        node.set_child(Dir::Left, left);
        node.set_child(Dir::Right, right);
        counter.record(Step::Link);
        counter.record(Step::Link);

        self.update_metrics(Some(handle), counter);
        Some(handle)
    }

    // ─── Rank select ────────────────────────────────────────────────────────

    /// Returns the node holding the `i`-th smallest key (one-based), or `None`
    /// when `i` is outside `1..=len`.
    pub(crate) fn select<C: Counter>(&self, i: usize, counter: &mut C) -> Option<Handle> {
        counter.record(Step::Compare);
        if i == 0 || i > self.size(self.root) {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = i;

        loop {
            counter.record(Step::Visit);
            let node = self.nodes.get(current);
            let left_size = self.size(node.left());

            counter.record(Step::Compare);
            if remaining == left_size + 1 {
                return Some(current);
            }

            counter.record(Step::Compare);
            if remaining <= left_size {
                current = node.left()?;
            } else {
                remaining -= left_size + 1;
                current = node.right()?;
            }
        }
    }

    /// Returns the one-based rank of the node behind `handle`.
    pub(crate) fn rank_of<C: Counter>(&self, handle: Handle, counter: &mut C) -> usize {
        let node = self.nodes.get(handle);
        let mut rank = self.size(node.left()) + 1;
        let mut child = handle;
        let mut parent = node.parent();

        while let Some(p) = parent {
            counter.record(Step::Visit);
            let parent_node = self.nodes.get(p);
            counter.record(Step::Compare);
            if parent_node.right() == Some(child) {
                rank += self.size(parent_node.left()) + 1;
            }
            child = p;
            parent = parent_node.parent();
        }

        rank
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost<C: Counter>(&self, handle: Handle, counter: &mut C) -> Handle {
        let mut current = handle;
        while let Some(left) = self.nodes.get(current).left() {
            counter.record(Step::Visit);
            current = left;
        }
        current
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        current
    }

    // ─── Invariant checking ─────────────────────────────────────────────────

    /// Validates every structural invariant. Panics with a descriptive message
    /// listing all violations.
    pub(crate) fn validate_invariants(&self) {
        let mut errors: Vec<String> = Vec::new();

        match self.root {
            None => {
                if !self.nodes.is_empty() {
                    errors.push(format!("empty tree still owns {} nodes", self.nodes.len()));
                }
            }
            Some(root) => {
                if self.nodes.get(root).parent().is_some() {
                    errors.push(format!("root {root:?} has a parent"));
                }

                let mut previous: Option<Key> = None;
                let (size, _) = self.validate_node(root, &mut previous, &mut errors);
                if size != self.nodes.len() {
                    errors.push(format!("root size {size} does not match {} live nodes", self.nodes.len()));
                }
            }
        }

        assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
    }

    // Returns (subtree_size, subtree_height) recomputed from scratch.
    fn validate_node(&self, handle: Handle, previous: &mut Option<Key>, errors: &mut Vec<String>) -> (usize, u8) {
        let Some(node) = self.nodes.try_get(handle) else {
            errors.push(format!("link to released node {handle:?}"));
            return (0, 0);
        };

        let (left_size, left_height) = self.validate_child(handle, node.left(), previous, errors);

        // In-order key sequence must be strictly increasing.
        if let Some(prev) = *previous
            && prev >= node.key()
        {
            errors.push(format!("keys out of order at {handle:?}: {prev} before {}", node.key()));
        }
        *previous = Some(node.key());

        let (right_size, right_height) = self.validate_child(handle, node.right(), previous, errors);

        let size = 1 + left_size + right_size;
        let height = 1 + max(left_height, right_height);
        if node.size() != size {
            errors.push(format!("size mismatch at {handle:?}: stored={}, actual={size}", node.size()));
        }
        if node.height() != height {
            errors.push(format!("height mismatch at {handle:?}: stored={}, actual={height}", node.height()));
        }
        if left_height.abs_diff(right_height) > 1 {
            errors.push(format!(
                "unbalanced at {handle:?} (key {}): left height {left_height}, right height {right_height}",
                node.key()
            ));
        }

        (size, height)
    }

    fn validate_child(
        &self,
        parent: Handle,
        child: Option<Handle>,
        previous: &mut Option<Key>,
        errors: &mut Vec<String>,
    ) -> (usize, u8) {
        let Some(child) = child else {
            return (0, 0);
        };

        match self.nodes.try_get(child).map(Node::parent) {
            Some(Some(p)) if p == parent => {}
            Some(other) => errors.push(format!("{child:?} has parent {other:?}, expected {parent:?}")),
            None => {}
        }

        self.validate_node(child, previous, errors)
    }
}
