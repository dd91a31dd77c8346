//! Order-statistic AVL tree for Rust.
//!
//! This crate provides [`OSAvlTree`], a height-balanced binary search tree whose
//! nodes also record the size of their subtree. The extra field turns rank
//! queries into O(log n) walks:
//!
//! - [`select`](OSAvlTree::select) - Find the node holding the i-th smallest key
//! - [`rank_of`](OSAvlTree::rank_of) - Get the sorted position of a node's key
//! - [`remove`](OSAvlTree::remove) - Delete a node and rebalance up to the root
//! - Indexing by [`Rank`] - e.g., `tree[Rank(1)]` for the smallest key
//!
//! Trees are built in bulk from a contiguous key range and then only shrink;
//! there is no single-key insertion.
//!
//! # Example
//!
//! ```
//! use osavl_tree::{OSAvlTree, Rank};
//!
//! let mut tree = OSAvlTree::build(8).unwrap();
//! assert_eq!(tree.height(), 4);
//! assert_eq!(tree[Rank(8)], 8);
//!
//! // Drain the tree by always removing the median.
//! while !tree.is_empty() {
//!     let median = tree.len().div_ceil(2);
//!     tree.remove_by_rank(median).unwrap();
//! }
//! assert!(tree.select(1).is_none());
//! ```
//!
//! # Counting operations
//!
//! Every operation has a `*_counted` variant that reports its structural steps
//! (node visits, comparisons, link rewrites, rotations, metric updates) to a
//! caller-supplied [`Counter`]. The tree keeps no global state; see [`StepCounts`].
//!
//! # Implementation
//!
//! All nodes live in a single arena and every link, including the parent
//! back-reference, is an index into it. Removing a node tombstones its slot, so
//! a stale [`NodeRef`] is reported as absent instead of dangling.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod counter;
mod error;
mod order_statistic;
mod os_avl_tree;
mod raw;

/// The key type stored in an [`OSAvlTree`].
pub type Key = i64;

pub use counter::{Counter, Step, StepCounts};
pub use error::BuildError;
pub use order_statistic::Rank;
pub use os_avl_tree::{Iter, OSAvlTree};
pub use raw::Handle as NodeRef;
