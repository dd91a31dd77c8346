use core::fmt;
use core::ops::RangeInclusive;

use crate::counter::Counter;
use crate::error::BuildError;
use crate::raw::RawOSTree;
use crate::{Key, NodeRef};

mod dump;
mod iter;
mod order_statistic;

pub use iter::Iter;

/// An order-statistic AVL tree over a contiguous range of integer keys.
///
/// The tree is built once, in bulk, from a sorted key range and afterwards only
/// shrinks: nodes are located by rank with [`select`] and removed with
/// [`remove`], which restores the AVL balance on the way back to the root.
/// Every node stores the size of its subtree, so rank queries take O(log n).
///
/// Nodes are addressed by [`NodeRef`]s, which are plain indices into the tree's
/// node arena. A reference to a removed node is reported as absent rather than
/// dangling.
///
/// [`select`]: OSAvlTree::select
/// [`remove`]: OSAvlTree::remove
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlTree;
///
/// let mut tree = OSAvlTree::build(8).unwrap();
/// assert_eq!(tree.height(), 4);
///
/// // The fifth smallest key.
/// let node = tree.select(5).unwrap();
/// assert_eq!(tree.key(node), Some(&5));
///
/// assert_eq!(tree.remove(node), Some(5));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7, 8]);
/// ```
#[derive(Clone)]
pub struct OSAvlTree {
    raw: RawOSTree,
}

impl OSAvlTree {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OSAvlTree { raw: RawOSTree::new() }
    }

    /// Builds a perfectly balanced tree holding the keys `1..=n`.
    ///
    /// The resulting height is `floor(log2(n)) + 1` for `n >= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the node storage cannot be allocated or `n`
    /// exceeds the number of addressable nodes.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::build(1000).unwrap();
    /// assert_eq!(tree.len(), 1000);
    /// assert_eq!(tree.height(), 10);
    /// ```
    pub fn build(n: usize) -> Result<Self, BuildError> {
        Self::build_counted(n, &mut ())
    }

    /// Like [`build`](OSAvlTree::build), reporting each step to `counter`.
    ///
    /// # Errors
    ///
    /// See [`build`](OSAvlTree::build).
    pub fn build_counted<C: Counter>(n: usize, mut counter: C) -> Result<Self, BuildError> {
        let end = Key::try_from(n).map_err(|_| BuildError::TooManyKeys { max: crate::raw::MAX_NODES })?;
        Self::from_range_counted(1..=end, &mut counter)
    }

    /// Builds a perfectly balanced tree holding every key in `range`.
    ///
    /// An empty range yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the node storage cannot be allocated or the
    /// range holds more keys than a tree can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from_range(-2..=2).unwrap();
    /// assert_eq!(tree.get_by_rank(1), Some(&-2));
    /// ```
    pub fn from_range(range: RangeInclusive<Key>) -> Result<Self, BuildError> {
        Self::from_range_counted(range, &mut ())
    }

    /// Like [`from_range`](OSAvlTree::from_range), reporting each step to `counter`.
    ///
    /// # Errors
    ///
    /// See [`from_range`](OSAvlTree::from_range).
    pub fn from_range_counted<C: Counter>(range: RangeInclusive<Key>, mut counter: C) -> Result<Self, BuildError> {
        let (start, end) = range.into_inner();
        let raw = RawOSTree::build(start, end, &mut counter)?;
        Ok(OSAvlTree { raw })
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes the tree's storage can hold.
    ///
    /// A built tree reserves at least one slot per key; removals never shrink it.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the height of the tree, 0 when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.raw.height(self.raw.root()))
    }

    /// Returns a reference to the root node.
    #[must_use]
    pub const fn root(&self) -> Option<NodeRef> {
        self.raw.root()
    }

    /// Returns `true` if `node` refers to a node currently in this tree.
    #[must_use]
    pub fn contains(&self, node: NodeRef) -> bool {
        self.raw.contains(node)
    }

    /// Returns the key held by `node`, or `None` if it has been removed.
    #[must_use]
    pub fn key(&self, node: NodeRef) -> Option<&Key> {
        self.raw.try_node(node).map(|n| n.key_ref())
    }

    /// Returns the number of nodes in the subtree rooted at `node`.
    ///
    /// A removed node has size 0.
    #[must_use]
    pub fn size_of(&self, node: NodeRef) -> usize {
        self.raw.try_node(node).map_or(0, |n| n.size())
    }

    /// Returns the height of the subtree rooted at `node`.
    ///
    /// A removed node has height 0.
    #[must_use]
    pub fn height_of(&self, node: NodeRef) -> usize {
        self.raw.try_node(node).map_or(0, |n| usize::from(n.height()))
    }

    /// Returns `height(left) - height(right)` for `node`, 0 for a removed node.
    #[must_use]
    pub fn balance_of(&self, node: NodeRef) -> isize {
        if self.raw.contains(node) {
            isize::from(self.raw.balance(Some(node)))
        } else {
            0
        }
    }

    /// Returns the children of `node` as `(left, right)`.
    #[must_use]
    pub fn children(&self, node: NodeRef) -> (Option<NodeRef>, Option<NodeRef>) {
        self.raw.try_node(node).map_or((None, None), |n| (n.left(), n.right()))
    }

    /// Returns the parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.raw.try_node(node).and_then(|n| n.parent())
    }

    /// Returns the node holding the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<NodeRef> {
        self.raw.root().map(|root| self.raw.leftmost(root, &mut ()))
    }

    /// Returns the node holding the largest key.
    #[must_use]
    pub fn last(&self) -> Option<NodeRef> {
        self.raw.root().map(|root| self.raw.rightmost(root))
    }

    /// Removes the key held by `node` and rebalances the tree.
    ///
    /// Returns the removed key, or `None` (leaving the tree untouched) if `node`
    /// is not in the tree.
    ///
    /// When `node` has two children it stays in the tree and takes over the key
    /// of its in-order successor, whose node is released instead. Any other
    /// reference to that successor becomes absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::build(1).unwrap();
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(tree.remove(root), Some(1));
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.remove(root), None);
    /// ```
    pub fn remove(&mut self, node: NodeRef) -> Option<Key> {
        self.remove_counted(node, &mut ())
    }

    /// Like [`remove`](OSAvlTree::remove), reporting each step to `counter`.
    pub fn remove_counted<C: Counter>(&mut self, node: NodeRef, mut counter: C) -> Option<Key> {
        let removed = self.raw.remove(node, &mut counter);
        debug_assert!(self.raw.root().is_none_or(|root| self.raw.node(root).parent().is_none()));
        removed
    }

    /// Removes every key, releasing all nodes.
    ///
    /// Every outstanding [`NodeRef`] becomes absent.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Panics if any structural invariant is violated.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.raw.validate_invariants();
    }
}

impl Default for OSAvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OSAvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a OSAvlTree {
    type Item = &'a Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
