use alloc::collections::TryReserveError;

use thiserror::Error;

/// The error returned when a tree cannot be constructed.
///
/// Construction is the only fallible operation: the whole tree is allocated up
/// front, so a failed reservation fails the call rather than yielding a truncated
/// tree.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BuildError {
    /// The node storage could not be reserved.
    #[error("failed to reserve storage for {len} nodes")]
    Alloc {
        /// Number of nodes requested.
        len: usize,
        /// The underlying reservation failure.
        #[source]
        source: TryReserveError,
    },
    /// The key range holds more keys than a tree can address.
    #[error("key range holds more than {max} keys")]
    TooManyKeys {
        /// The largest supported number of keys.
        max: usize,
    },
}
