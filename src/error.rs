//! Error types for chain operations.

use std::fmt;

/// An operation that needs at least one link was invoked on an empty
/// chain. The chain is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyChainError;

impl fmt::Display for EmptyChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain is empty")
    }
}

impl std::error::Error for EmptyChainError {}

/// Invalid segment bounds passed to [`partition`].
///
/// Requires `from <= to <= len`. The chain is left unchanged.
///
/// [`partition`]: crate::Chain::partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionError {
    /// First ring position of the requested segment.
    pub from: usize,
    /// One past the last ring position of the requested segment.
    pub to: usize,
    /// Chain length at the time of the call.
    pub len: usize,
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {}..{} out of bounds for chain of length {}",
            self.from, self.to, self.len
        )
    }
}

impl std::error::Error for PartitionError {}
