//! Operation counting hooks.
//!
//! Every counted tree operation reports its structural steps to a caller-supplied
//! [`Counter`]. The tree never aggregates or renders the counts itself; pass `&mut ()`
//! to ignore them, a `u64` for a single running total, or a [`StepCounts`] for a
//! breakdown by kind.

/// A kind of structural step performed by a tree operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Step {
    /// A node was read while descending or ascending the tree.
    Visit,
    /// A rank or balance comparison.
    Compare,
    /// A child or parent link was rewritten.
    Link,
    /// A single left or right rotation.
    Rotation,
    /// A node's size and height were recomputed from its children.
    MetricUpdate,
}

/// Receives one call per structural step of a counted operation.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlTree, StepCounts};
///
/// let mut counts = StepCounts::new();
/// let tree = OSAvlTree::build_counted(100, &mut counts).unwrap();
/// tree.select_counted(42, &mut counts);
///
/// assert_eq!(counts.metric_updates, 100);
/// assert!(counts.total() > 100);
/// ```
pub trait Counter {
    /// Records a single step.
    fn record(&mut self, step: Step);
}

impl Counter for () {
    #[inline]
    fn record(&mut self, _step: Step) {}
}

impl Counter for u64 {
    #[inline]
    fn record(&mut self, _step: Step) {
        *self += 1;
    }
}

impl<C: Counter + ?Sized> Counter for &mut C {
    #[inline]
    fn record(&mut self, step: Step) {
        (**self).record(step);
    }
}

/// Per-kind tallies of recorded [`Step`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct StepCounts {
    /// Number of [`Step::Visit`] steps.
    pub visits: u64,
    /// Number of [`Step::Compare`] steps.
    pub comparisons: u64,
    /// Number of [`Step::Link`] steps.
    pub links: u64,
    /// Number of [`Step::Rotation`] steps.
    pub rotations: u64,
    /// Number of [`Step::MetricUpdate`] steps.
    pub metric_updates: u64,
}

impl StepCounts {
    /// Creates a zeroed tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visits: 0,
            comparisons: 0,
            links: 0,
            rotations: 0,
            metric_updates: 0,
        }
    }

    /// Returns the number of steps of every kind.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.visits + self.comparisons + self.links + self.rotations + self.metric_updates
    }
}

impl Counter for StepCounts {
    fn record(&mut self, step: Step) {
        match step {
            Step::Visit => self.visits += 1,
            Step::Compare => self.comparisons += 1,
            Step::Link => self.links += 1,
            Step::Rotation => self.rotations += 1,
            Step::MetricUpdate => self.metric_updates += 1,
        }
    }
}
