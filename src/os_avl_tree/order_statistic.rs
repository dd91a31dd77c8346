use core::ops::Index;

use super::OSAvlTree;
use crate::counter::Counter;
use crate::{Key, NodeRef, Rank};

impl OSAvlTree {
    /// Returns the node holding the `i`-th smallest key.
    ///
    /// Ranks are one-based. Returns `None` if `i` is 0 or greater than
    /// [`len`](OSAvlTree::len).
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
    /// let tree = OSAvlTree::build(8).unwrap();
    /// let node = tree.select(1).unwrap();
    /// assert_eq!(tree.key(node), Some(&1));
    /// assert!(tree.select(0).is_none());
    /// assert!(tree.select(9).is_none());
    /// ```
    #[must_use]
    pub fn select(&self, i: usize) -> Option<NodeRef> {
        self.select_counted(i, &mut ())
    }

    /// Like [`select`](OSAvlTree::select), reporting each step to `counter`.
    pub fn select_counted<C: Counter>(&self, i: usize, mut counter: C) -> Option<NodeRef> {
        self.raw.select(i, &mut counter)
    }

    /// Returns the `i`-th smallest key (one-based).
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from_range(10..=20).unwrap();
    /// assert_eq!(tree.get_by_rank(3), Some(&12));
    /// assert_eq!(tree.get_by_rank(12), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, i: usize) -> Option<&Key> {
        self.select(i).map(|node| self.raw.node(node).key_ref())
    }

    /// Returns the one-based rank of the key held by `node`, or `None` if
    /// `node` has been removed.
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
    /// let mut tree = OSAvlTree::build(10).unwrap();
    /// let seven = tree.select(7).unwrap();
    /// tree.remove(tree.select(2).unwrap());
    ///
    /// assert_eq!(tree.rank_of(seven), Some(6));
    /// ```
    #[must_use]
    pub fn rank_of(&self, node: NodeRef) -> Option<usize> {
        self.rank_of_counted(node, &mut ())
    }

    /// Like [`rank_of`](OSAvlTree::rank_of), reporting each step to `counter`.
    pub fn rank_of_counted<C: Counter>(&self, node: NodeRef, mut counter: C) -> Option<usize> {
        self.raw.contains(node).then(|| self.raw.rank_of(node, &mut counter))
    }

    /// Removes the `i`-th smallest key (one-based) and returns it.
    ///
    /// Returns `None`, leaving the tree untouched, if `i` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::build(3).unwrap();
    /// assert_eq!(tree.remove_by_rank(2), Some(2));
    /// assert_eq!(tree.remove_by_rank(3), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove_by_rank(&mut self, i: usize) -> Option<Key> {
        self.remove_by_rank_counted(i, &mut ())
    }

    /// Like [`remove_by_rank`](OSAvlTree::remove_by_rank), reporting each step
    /// of both the select and the removal to `counter`.
    pub fn remove_by_rank_counted<C: Counter>(&mut self, i: usize, mut counter: C) -> Option<Key> {
        let node = self.select_counted(i, &mut counter)?;
        self.remove_counted(node, &mut counter)
    }
}

/// Indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is 0 or greater than the number of keys.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlTree, Rank};
///
/// let tree = OSAvlTree::from_range(10..=20).unwrap();
/// assert_eq!(tree[Rank(1)], 10);
/// ```
impl Index<Rank> for OSAvlTree {
    type Output = Key;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("rank out of bounds")
    }
}
