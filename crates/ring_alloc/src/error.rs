//! # Allocator Error Types
//!
//! All errors that can occur while allocating from or freeing into the ring.

use thiserror::Error;

/// Errors that can occur in the ring allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Requested size is zero or larger than the whole pool.
    #[error("invalid allocation size {requested} for a pool of {pool_size} bytes")]
    InvalidSize {
        /// The size that was requested.
        requested: usize,
        /// Total pool capacity.
        pool_size: usize,
    },

    /// The request does not fit the current head/tail geometry.
    #[error("out of space: {requested} bytes requested (head {head}, tail {tail})")]
    OutOfSpace {
        /// The size that was requested.
        requested: usize,
        /// Head cursor at the time of the request.
        head: usize,
        /// Tail cursor at the time of the request.
        tail: usize,
    },

    /// Too many allocations are live at once.
    #[error("too many outstanding allocations (max {max_outstanding})")]
    CapacityExceeded {
        /// Configured maximum of live allocations.
        max_outstanding: usize,
    },

    /// Free called while nothing is allocated.
    #[error("free of untracked region at offset {offset}: nothing is allocated")]
    UntrackedFree {
        /// Offset the caller tried to free.
        offset: usize,
    },

    /// Freed region is not the oldest live allocation.
    #[error("out-of-order free: expected offset {expected}, got {found}")]
    OutOfOrderFree {
        /// Offset of the oldest live allocation.
        expected: usize,
        /// Offset the caller tried to free.
        found: usize,
    },

    /// Region does not lie inside the pool.
    #[error("region [{offset}, {offset}+{len}) lies outside a pool of {pool_size} bytes")]
    RegionOutOfBounds {
        /// Region start.
        offset: usize,
        /// Region length.
        len: usize,
        /// Total pool capacity.
        pool_size: usize,
    },

    /// Typed access with a value whose size differs from the region.
    #[error("size mismatch: region is {region_len} bytes, value is {value_len} bytes")]
    SizeMismatch {
        /// Region length.
        region_len: usize,
        /// `size_of` the value type.
        value_len: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RingError {
    /// Returns true for transient failures that may succeed after a free.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfSpace { .. } | Self::CapacityExceeded { .. })
    }

    /// Returns true when the caller broke the FIFO free protocol.
    ///
    /// The allocator makes no attempt to repair itself after one of these.
    #[inline]
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::UntrackedFree { .. } | Self::OutOfOrderFree { .. })
    }
}

/// Result type for allocator operations.
pub type RingResult<T> = Result<T, RingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let oos = RingError::OutOfSpace { requested: 10, head: 50, tail: 50 };
        assert!(oos.is_recoverable());
        assert!(!oos.is_protocol_violation());

        let full = RingError::CapacityExceeded { max_outstanding: 4 };
        assert!(full.is_recoverable());

        let order = RingError::OutOfOrderFree { expected: 0, found: 10 };
        assert!(order.is_protocol_violation());
        assert!(!order.is_recoverable());

        let untracked = RingError::UntrackedFree { offset: 3 };
        assert!(untracked.is_protocol_violation());

        let size = RingError::InvalidSize { requested: 0, pool_size: 10 };
        assert!(!size.is_recoverable());
        assert!(!size.is_protocol_violation());
    }

    #[test]
    fn test_error_messages() {
        let err = RingError::OutOfOrderFree { expected: 0, found: 50 };
        assert_eq!(err.to_string(), "out-of-order free: expected offset 0, got 50");

        let err = RingError::InvalidConfig("pool_size must be positive".into());
        assert_eq!(err.to_string(), "invalid configuration: pool_size must be positive");
    }
}
