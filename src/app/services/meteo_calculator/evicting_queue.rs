//! Fixed-capacity FIFO buffer that evicts its oldest element on overflow.

use std::collections::VecDeque;

/// A bounded FIFO queue retaining only the most recent `capacity` pushes.
///
/// Pushing into a full queue silently drops the oldest element, so the queue
/// always holds the trailing window of whatever was fed in.
#[derive(Debug, Clone)]
pub struct EvictingQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> EvictingQueue<T> {
    /// Create a queue holding at most `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-width window has no meaning.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "EvictingQueue capacity must be positive");
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, evicting the oldest element if the queue is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Number of elements currently retained.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True once `capacity` elements have been pushed over the lifetime.
    ///
    /// Eviction keeps the length pinned at `capacity` from then on, so a full
    /// queue never becomes partial again.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over the retained elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
