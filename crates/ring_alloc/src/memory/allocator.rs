//! # Ring Allocator
//!
//! Variable-size allocator over a pre-allocated byte pool used as a ring.
//! Frees must happen in allocation order, which lets liveness be tracked
//! with a head and a tail cursor instead of a free list.
//!
//! ```text
//!   No carry: live bytes sit between tail and head.
//!
//!   ┌──────────┬───────────────────────────┬───────────────────┐
//!   │   free   │           live            │       free        │
//!   └──────────┴───────────────────────────┴───────────────────┘
//!              ▲                           ▲
//!             tail                        head
//!
//!   Carry set: head restarted at 0 while older allocations are still live.
//!
//!   ┌──────────────────┬───────────────┬─────────────────────────┐
//!   │  live (newest)   │     free      │      live (oldest)      │
//!   └──────────────────┴───────────────┴─────────────────────────┘
//!                      ▲               ▲
//!                     head            tail
//! ```

use super::snapshot::RingSnapshot;
use super::tracker::OrderTracker;
use crate::config::RingConfig;
use crate::error::{RingError, RingResult};
use bytemuck::Pod;

/// Handle to a live allocation: a byte range of the pool.
///
/// Handles are plain indices. They stay `Copy` after a free, so holding on
/// to one past its free is a logic error the allocator cannot detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    offset: usize,
    size: usize,
}

impl Region {
    /// Offset of the first byte inside the pool.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        self.size
    }

    /// Offset one past the last byte.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.size
    }

    /// True if the two regions share at least one byte.
    #[inline]
    #[must_use]
    pub const fn overlaps(self, other: Region) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Where a feasible request lands.
#[derive(Clone, Copy)]
struct Placement {
    offset: usize,
    /// Head restarts at 0 before this allocation.
    restarts: bool,
}

/// A FIFO ring buffer allocator.
///
/// All memory is allocated once at construction. `allocate` and `free` are
/// **O(1)** with **zero heap activity**.
///
/// # Thread Safety
///
/// This allocator is NOT thread-safe. Use one per thread or wrap in a mutex.
///
/// # Example
///
/// ```rust
/// use ring_alloc::{RingAllocator, RingError};
///
/// let mut ring = RingAllocator::new(100, 4)?;
///
/// let a = ring.allocate(50)?;
/// let b = ring.allocate(25)?;
/// ring.bytes_mut(a)?.fill(0xAB);
///
/// // Only the oldest allocation may be freed
/// assert!(matches!(ring.free(b), Err(RingError::OutOfOrderFree { .. })));
/// # Ok::<(), RingError>(())
/// ```
pub struct RingAllocator {
    /// The byte pool.
    pool: Box<[u8]>,
    /// Offset of the next allocation.
    head: usize,
    /// Offset of the oldest live allocation.
    tail: usize,
    /// Live region wraps past the end of the pool.
    carry_flag: bool,
    /// Live allocations in allocation order.
    tracker: OrderTracker,
}

impl RingAllocator {
    /// Creates an allocator with a pool of `pool_size` bytes and room for
    /// `max_outstanding` live allocations.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] if either argument is zero.
    pub fn new(pool_size: usize, max_outstanding: usize) -> RingResult<Self> {
        Self::from_config(RingConfig::new(pool_size, max_outstanding))
    }

    /// Creates an allocator from a config.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] if the config fails validation.
    pub fn from_config(config: RingConfig) -> RingResult<Self> {
        config.validate()?;

        tracing::debug!(
            pool_size = config.pool_size,
            max_outstanding = config.max_outstanding,
            "ring allocator created"
        );

        Ok(Self {
            pool: vec![0u8; config.pool_size].into_boxed_slice(),
            head: 0,
            tail: 0,
            carry_flag: false,
            tracker: OrderTracker::new(config.max_outstanding),
        })
    }

    /// Pool capacity in bytes.
    #[inline]
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Maximum number of live allocations.
    #[inline]
    #[must_use]
    pub fn max_outstanding(&self) -> usize {
        self.tracker.capacity()
    }

    /// Number of live allocations.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.tracker.len()
    }

    /// True if nothing is allocated.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Offset the next allocation would start from.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Offset of the oldest live allocation.
    #[inline]
    #[must_use]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// True while the live region wraps past the end of the pool.
    #[inline]
    #[must_use]
    pub const fn carry_flag(&self) -> bool {
        self.carry_flag
    }

    /// Offsets of live allocations, oldest first.
    pub fn live_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.tracker.iter()
    }

    /// The whole pool, including bytes of freed allocations.
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &[u8] {
        &self.pool
    }

    /// Allocates `size` contiguous bytes.
    ///
    /// # Errors
    ///
    /// - [`RingError::InvalidSize`] if `size` is zero or exceeds the pool.
    /// - [`RingError::OutOfSpace`] if the request does not fit right now.
    /// - [`RingError::CapacityExceeded`] if `max_outstanding` allocations are live.
    pub fn allocate(&mut self, size: usize) -> RingResult<Region> {
        let pool_size = self.pool_size();
        if size == 0 || size > pool_size {
            return Err(RingError::InvalidSize {
                requested: size,
                pool_size,
            });
        }

        let Some(placement) = self.place(size) else {
            tracing::trace!(size, head = self.head, tail = self.tail, "ring out of space");
            return Err(RingError::OutOfSpace {
                requested: size,
                head: self.head,
                tail: self.tail,
            });
        };

        // Record before touching the cursors so a full tracker changes nothing
        self.tracker.push(placement.offset).map_err(|_| RingError::CapacityExceeded {
            max_outstanding: self.tracker.capacity(),
        })?;

        if placement.restarts {
            tracing::trace!(size, "head wrapped to pool start");
            self.carry_flag = true;
        }

        self.head = placement.offset + size;
        if self.head == pool_size {
            self.head = 0;
            self.carry_flag = true;
        }

        Ok(Region {
            offset: placement.offset,
            size,
        })
    }

    /// Decides where `size` bytes go, or `None` if they do not fit.
    fn place(&self, size: usize) -> Option<Placement> {
        let pool_size = self.pool_size();
        let end = self.head + size;

        if end >= pool_size {
            // Landing exactly on the boundary spills nothing past offset 0
            let exact = end == pool_size;
            let spill = if exact { 0 } else { size };

            if self.carry_flag || spill > self.tail {
                return None;
            }

            Some(if exact {
                Placement {
                    offset: self.head,
                    restarts: false,
                }
            } else {
                Placement {
                    offset: 0,
                    restarts: true,
                }
            })
        } else if !self.carry_flag || end <= self.tail {
            Some(Placement {
                offset: self.head,
                restarts: false,
            })
        } else {
            None
        }
    }

    /// Frees the oldest live allocation.
    ///
    /// # Errors
    ///
    /// - [`RingError::UntrackedFree`] if nothing is allocated.
    /// - [`RingError::OutOfOrderFree`] if `region` is not the oldest live
    ///   allocation. The oldest entry has already been consumed at that
    ///   point; the allocator does not try to restore it.
    pub fn free(&mut self, region: Region) -> RingResult<()> {
        let offset = region.offset;

        let Ok(expected) = self.tracker.pop() else {
            tracing::warn!(offset, "free with no live allocation");
            return Err(RingError::UntrackedFree { offset });
        };

        if expected != offset {
            tracing::warn!(expected, found = offset, "out-of-order free");
            return Err(RingError::OutOfOrderFree {
                expected,
                found: offset,
            });
        }

        if let Ok(new_tail) = self.tracker.peek_oldest() {
            // Oldest live region no longer sits above the old tail: wrap vacated
            if new_tail <= self.tail {
                self.carry_flag = false;
            }
            self.tail = new_tail;
        } else {
            tracing::trace!("ring drained, cursors reset");
            self.head = 0;
            self.tail = 0;
            self.carry_flag = false;
        }

        Ok(())
    }

    /// Read-only view of a region's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::RegionOutOfBounds`] if `region` does not fit the pool.
    pub fn bytes(&self, region: Region) -> RingResult<&[u8]> {
        let pool_size = self.pool_size();
        self.pool
            .get(region.offset..region.end())
            .ok_or(RingError::RegionOutOfBounds {
                offset: region.offset,
                len: region.size,
                pool_size,
            })
    }

    /// Mutable view of a region's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::RegionOutOfBounds`] if `region` does not fit the pool.
    pub fn bytes_mut(&mut self, region: Region) -> RingResult<&mut [u8]> {
        let pool_size = self.pool_size();
        self.pool
            .get_mut(region.offset..region.end())
            .ok_or(RingError::RegionOutOfBounds {
                offset: region.offset,
                len: region.size,
                pool_size,
            })
    }

    /// Copies `value` into `region`. No alignment is required.
    ///
    /// # Errors
    ///
    /// - [`RingError::SizeMismatch`] if `size_of::<T>()` differs from the region size.
    /// - [`RingError::RegionOutOfBounds`] if `region` does not fit the pool.
    pub fn write_value<T: Pod>(&mut self, region: Region, value: &T) -> RingResult<()> {
        check_size::<T>(region)?;
        self.bytes_mut(region)?
            .copy_from_slice(bytemuck::bytes_of(value));
        Ok(())
    }

    /// Reads a `T` out of `region`. No alignment is required.
    ///
    /// # Errors
    ///
    /// - [`RingError::SizeMismatch`] if `size_of::<T>()` differs from the region size.
    /// - [`RingError::RegionOutOfBounds`] if `region` does not fit the pool.
    pub fn read_value<T: Pod>(&self, region: Region) -> RingResult<T> {
        check_size::<T>(region)?;
        Ok(bytemuck::pod_read_unaligned(self.bytes(region)?))
    }

    /// Allocates `size_of::<T>()` bytes and copies `value` into them.
    ///
    /// # Errors
    ///
    /// Same as [`allocate`](Self::allocate).
    pub fn allocate_value<T: Pod>(&mut self, value: &T) -> RingResult<Region> {
        let region = self.allocate(std::mem::size_of::<T>())?;
        self.bytes_mut(region)?
            .copy_from_slice(bytemuck::bytes_of(value));
        Ok(region)
    }

    /// Captures the current cursor state.
    #[must_use]
    pub fn snapshot(&self) -> RingSnapshot {
        let range = self.pool.as_ptr_range();
        RingSnapshot {
            buffer_start: range.start as usize,
            buffer_end: range.end as usize,
            head: self.head,
            tail: self.tail,
            pool_size: self.pool_size(),
            carry_flag: self.carry_flag,
            live_count: self.live_count(),
            max_outstanding: self.max_outstanding(),
        }
    }
}

impl std::fmt::Debug for RingAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingAllocator")
            .field("pool_size", &self.pool_size())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("carry_flag", &self.carry_flag)
            .field("live", &self.tracker)
            .finish_non_exhaustive()
    }
}

fn check_size<T>(region: Region) -> RingResult<()> {
    let value_len = std::mem::size_of::<T>();
    if value_len == region.size {
        Ok(())
    } else {
        Err(RingError::SizeMismatch {
            region_len: region.size,
            value_len,
        })
    }
}
