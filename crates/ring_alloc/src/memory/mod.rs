//! # Memory Management
//!
//! Pre-allocated ring pool and the bookkeeping that enforces FIFO frees.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once at construction. Afterwards:
//! - No heap allocations
//! - No free lists
//! - O(1) allocate and free

mod allocator;
mod ring_queue;
mod snapshot;
mod tracker;

pub use allocator::{Region, RingAllocator};
pub use ring_queue::BoundedRing;
pub use snapshot::RingSnapshot;
pub use tracker::{OrderTracker, TrackerError};
