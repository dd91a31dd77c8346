use core::ops::Not;

use super::handle::Handle;
use crate::Key;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

// AVL node augmented with the size of its subtree.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: Key,
    // Number of nodes in the subtree rooted here, including this one.
    size: usize,
    // 1 + max(height(left), height(right)); an absent child has height 0.
    height: u8,
    left: Option<Handle>,
    right: Option<Handle>,
    // Back-reference only, used to walk towards the root while rebalancing.
    parent: Option<Handle>,
}

impl Node {
    /// Creates a detached leaf holding `key`.
    pub(crate) const fn new(key: Key, parent: Option<Handle>) -> Self {
        Self {
            key,
            size: 1,
            height: 1,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub(crate) fn key_ref(&self) -> &Key {
        &self.key
    }

    pub(crate) fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    /// Overwrites the stored metrics. Only the metric updater calls this.
    pub(crate) fn set_metrics(&mut self, size: usize, height: u8) {
        self.size = size;
        self.height = height;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn child(&self, dir: Dir) -> Option<Handle> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, dir: Dir, child: Option<Handle>) {
        match dir {
            Dir::Left => self.left = child,
            Dir::Right => self.right = child,
        }
    }

    /// Returns the slot that holds `child`, if it is a child of this node.
    pub(crate) fn dir_of(&self, child: Handle) -> Option<Dir> {
        if self.left == Some(child) {
            Some(Dir::Left)
        } else if self.right == Some(child) {
            Some(Dir::Right)
        } else {
            None
        }
    }
}
