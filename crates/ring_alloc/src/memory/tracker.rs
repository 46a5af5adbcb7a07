//! # Order Tracker
//!
//! Records the offset of every live allocation in allocation order. The
//! front of the queue is always the only allocation that may be freed next.

use super::ring_queue::BoundedRing;
use thiserror::Error;

/// Errors raised by the order tracker.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// Every slot holds a live allocation.
    #[error("order tracker full (capacity {capacity})")]
    Full {
        /// Fixed tracker capacity.
        capacity: usize,
    },

    /// No allocation is live.
    #[error("order tracker empty")]
    Empty,
}

/// Bounded FIFO of live allocation offsets.
#[derive(Debug)]
pub struct OrderTracker {
    offsets: BoundedRing<usize>,
}

impl OrderTracker {
    /// Creates a tracker for at most `max_outstanding` live allocations.
    ///
    /// # Panics
    ///
    /// Panics if `max_outstanding` is zero.
    #[must_use]
    pub fn new(max_outstanding: usize) -> Self {
        Self {
            offsets: BoundedRing::with_capacity(max_outstanding),
        }
    }

    /// Records a new allocation at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Full`] if `max_outstanding` allocations are live.
    #[inline]
    pub fn push(&mut self, offset: usize) -> Result<(), TrackerError> {
        self.offsets.push(offset).map_err(|_| TrackerError::Full {
            capacity: self.offsets.capacity(),
        })
    }

    /// Removes and returns the oldest live offset.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Empty`] if nothing is live.
    #[inline]
    pub fn pop(&mut self) -> Result<usize, TrackerError> {
        self.offsets.pop().ok_or(TrackerError::Empty)
    }

    /// Returns the oldest live offset without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Empty`] if nothing is live.
    #[inline]
    pub fn peek_oldest(&self) -> Result<usize, TrackerError> {
        self.offsets.peek().ok_or(TrackerError::Empty)
    }

    /// Number of live allocations.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if nothing is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Maximum number of live allocations.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.offsets.capacity()
    }

    /// Live offsets, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_order() {
        let mut tracker = OrderTracker::new(4);
        tracker.push(0).unwrap();
        tracker.push(50).unwrap();

        assert_eq!(tracker.peek_oldest(), Ok(0));
        assert_eq!(tracker.pop(), Ok(0));
        assert_eq!(tracker.peek_oldest(), Ok(50));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_tracker_full() {
        let mut tracker = OrderTracker::new(1);
        tracker.push(0).unwrap();
        assert_eq!(tracker.push(10), Err(TrackerError::Full { capacity: 1 }));
    }

    #[test]
    fn test_tracker_empty() {
        let mut tracker = OrderTracker::new(2);
        assert_eq!(tracker.pop(), Err(TrackerError::Empty));
        assert_eq!(tracker.peek_oldest(), Err(TrackerError::Empty));
        assert!(tracker.is_empty());
    }
}
