// SPDX-License-Identifier: MPL-2.0
//! Bounded event storage.
//!
//! The gallery may run for a long session and fail on many files; the
//! diagnostics buffer keeps only the most recent events and counts how many
//! older ones it had to let go.

use std::collections::VecDeque;

use crate::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};

/// Number of events the diagnostics buffer holds.
///
/// Always within `[16, 4096]`: out-of-range requests (for instance from a
/// hand-edited settings file) are clamped.
///
/// ```
/// use lens_gallery::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(512).value(), 512);
/// assert_eq!(BufferCapacity::new(3).value(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        ))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

/// FIFO ring: once full, each push drops the oldest item.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
    evicted: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Unclamped constructor for small test buffers. Zero becomes one.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
            self.evicted += 1;
        }
        self.items.push_back(item);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items dropped to make room since creation.
    #[must_use]
    pub fn evicted(&self) -> usize {
        self.evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped_to_configured_range() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            BufferCapacity::new(usize::MAX).value(),
            MAX_DIAGNOSTICS_BUFFER_CAPACITY
        );
        assert_eq!(BufferCapacity::new(1000).value(), 1000);
        assert_eq!(
            BufferCapacity::default().value(),
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn keeps_most_recent_items_and_counts_evictions() {
        let mut ring = CircularBuffer::with_raw_capacity(3);
        for name in ["a.png", "b.png", "c.png", "d.png", "e.png"] {
            ring.push(name);
        }

        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["c.png", "d.png", "e.png"]);
        assert_eq!(ring.last(), Some(&"e.png"));
        assert_eq!(ring.evicted(), 2);
    }

    #[test]
    fn zero_raw_capacity_holds_one_item() {
        let mut ring = CircularBuffer::with_raw_capacity(0);
        ring.push('x');
        ring.push('y');
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.last(), Some(&'y'));
    }

    #[test]
    fn new_uses_buffer_capacity() {
        let ring: CircularBuffer<u8> = CircularBuffer::new(BufferCapacity::new(64));
        assert_eq!(ring.capacity(), 64);
    }
}
