//! # Bounded Ring Queue
//!
//! Fixed-capacity circular FIFO. Storage is allocated once at construction
//! and never grows.

/// A bounded circular FIFO queue.
///
/// Push and pop are **O(1)** index arithmetic with zero heap activity.
///
/// # Thread Safety
///
/// This queue is NOT thread-safe.
///
/// # Example
///
/// ```rust
/// use ring_alloc::BoundedRing;
///
/// let mut ring: BoundedRing<u32> = BoundedRing::with_capacity(2);
/// ring.push(1).unwrap();
/// ring.push(2).unwrap();
/// assert_eq!(ring.push(3), Err(3)); // full, value handed back
/// assert_eq!(ring.pop(), Some(1));
/// ```
pub struct BoundedRing<T> {
    /// Backing slots. `None` marks an empty slot.
    slots: Box<[Option<T>]>,
    /// Index of the oldest element.
    front: usize,
    /// Index where the next element is written.
    rear: usize,
    /// Number of live elements.
    len: usize,
}

impl<T: Copy> BoundedRing<T> {
    /// Creates an empty queue holding at most `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let slots: Vec<Option<T>> = (0..capacity).map(|_| None).collect();

        Self {
            slots: slots.into_boxed_slice(),
            front: 0,
            rear: 0,
            len: 0,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of queued elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is queued.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if no more elements fit.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    ///
    /// Hands `value` back if the queue is full.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        self.slots[self.rear] = Some(value);
        self.rear = self.wrap(self.rear + 1);
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the oldest element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.front].take();
        self.front = self.wrap(self.front + 1);
        self.len -= 1;

        value
    }

    /// Returns the oldest element without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front]
    }

    /// Iterates over queued elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[(self.front + i) % self.capacity()])
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        if index >= self.capacity() {
            0
        } else {
            index
        }
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for BoundedRing<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
