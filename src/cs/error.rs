//! Error types shared by the table implementations.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by table construction and growth.
///
/// A missing key is never an error: lookups and removals report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor argument was rejected (load factor, requested capacity).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Growing the table would exceed the largest representable capacity.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator could not provide storage for a rebuilt slot array.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
