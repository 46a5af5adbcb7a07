//! # Ring Allocator
//!
//! Fixed-capacity, single-threaded allocator that hands out byte ranges of
//! one pre-allocated pool used as a circular buffer. Built for per-request
//! or per-tick scratch memory where allocate/free cycles are hot.
//!
//! ## The One Rule
//!
//! **Frees happen in allocation order.** A region may only be freed once
//! every region allocated before it has been freed. In exchange, liveness
//! is two cursors and a bounded queue: no free list, no headers, no search.
//!
//! ## Example
//!
//! ```rust
//! use ring_alloc::{RingAllocator, RingError};
//!
//! let mut ring = RingAllocator::new(100, 5)?;
//!
//! let a = ring.allocate(50)?;
//! let b = ring.allocate(25)?;
//! ring.free(a)?;
//!
//! // Wraps around to the start of the pool
//! let c = ring.allocate(50)?;
//! assert_eq!(c.offset(), 0);
//!
//! // Would run into `b`
//! assert!(matches!(ring.allocate(10), Err(RingError::OutOfSpace { .. })));
//!
//! ring.free(b)?;
//! ring.free(c)?;
//! # Ok::<(), RingError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;

pub use config::RingConfig;
pub use error::{RingError, RingResult};
pub use memory::{BoundedRing, OrderTracker, Region, RingAllocator, RingSnapshot, TrackerError};
