use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::OSAvlTree;
use crate::Key;
use crate::raw::{Handle, RawOSTree};

// An AVL tree addressable by 32-bit handles is at most 46 levels deep, so the
// spine never spills.
type Stack = SmallVec<[Handle; 64]>;

/// An in-order iterator over the keys of an [`OSAvlTree`].
///
/// This `struct` is created by the [`iter`] method on [`OSAvlTree`].
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlTree;
///
/// let tree = OSAvlTree::build(3).unwrap();
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.len(), 2);
/// ```
///
/// [`iter`]: OSAvlTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    tree: &'a RawOSTree,
    stack: Stack,
    remaining: usize,
}

impl OSAvlTree {
    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from_range(4..=6).unwrap();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [4, 5, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: &self.raw,
            stack: Stack::new(),
            remaining: self.raw.len(),
        };
        iter.push_left_spine(self.raw.root());
        iter
    }
}

impl Iter<'_> {
    fn push_left_spine(&mut self, mut node: Option<Handle>) {
        while let Some(handle) = node {
            self.stack.push(handle);
            node = self.tree.node(handle).left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<&'a Key> {
        let handle = self.stack.pop()?;
        let tree: &'a RawOSTree = self.tree;
        let node = tree.node(handle);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.key_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
