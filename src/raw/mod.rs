mod arena;
mod handle;
mod node;
mod raw_os_tree;
mod remove;
mod rotate;

pub use handle::Handle;
pub(crate) use raw_os_tree::RawOSTree;

/// The largest number of nodes a single tree can hold.
pub(crate) const MAX_NODES: usize = Handle::MAX;
