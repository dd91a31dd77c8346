use core::fmt;

use super::OSAvlTree;
use crate::raw::Handle;

/// Renders an indented pre-order listing, one node per line as
/// `key (s=size, h=height)`, indented two spaces per level.
///
/// The layout is meant for diagnostics and may change.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlTree;
///
/// let tree = OSAvlTree::build(3).unwrap();
/// assert_eq!(
///     tree.to_string(),
///     "2 (s=3, h=2)\n  1 (s=1, h=1)\n  3 (s=1, h=1)\n",
/// );
/// ```
impl fmt::Display for OSAvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.raw.root() {
            self.dump(f, root, 0)?;
        }
        Ok(())
    }
}

impl OSAvlTree {
    fn dump(&self, f: &mut fmt::Formatter<'_>, handle: Handle, depth: usize) -> fmt::Result {
        let node = self.raw.node(handle);
        writeln!(
            f,
            "{:indent$}{} (s={}, h={})",
            "",
            node.key(),
            node.size(),
            node.height(),
            indent = depth * 2
        )?;
        for child in [node.left(), node.right()].into_iter().flatten() {
            self.dump(f, child, depth + 1)?;
        }
        Ok(())
    }
}
