/// A one-based rank into the sorted order of an [`OSAvlTree`](crate::OSAvlTree).
///
/// `Rank(1)` is the smallest key.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlTree, Rank};
///
/// let tree = OSAvlTree::build(5).unwrap();
/// assert_eq!(tree[Rank(1)], 1);
/// assert_eq!(tree[Rank(5)], 5);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
