//! # Allocator Snapshot
//!
//! Point-in-time view of the cursor state for observability and tests.

use std::fmt;

/// Copy of the allocator's cursor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingSnapshot {
    /// Address of the first pool byte.
    pub buffer_start: usize,
    /// Address one past the last pool byte.
    pub buffer_end: usize,
    /// Offset of the next allocation.
    pub head: usize,
    /// Offset of the oldest live allocation.
    pub tail: usize,
    /// Pool capacity in bytes.
    pub pool_size: usize,
    /// Live region wraps past the end of the pool.
    pub carry_flag: bool,
    /// Number of live allocations.
    pub live_count: usize,
    /// Maximum number of live allocations.
    pub max_outstanding: usize,
}

impl fmt::Display for RingSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{StartAddr: {:#x}, EndAddr: {:#x}, Head: {}, Tail: {}, MemPoolSize: {}, CarryFlag: {}, Live: {}/{}}}",
            self.buffer_start,
            self.buffer_end,
            self.head,
            self.tail,
            self.pool_size,
            u8::from(self.carry_flag),
            self.live_count,
            self.max_outstanding,
        )
    }
}
