//! # Probe Sequences
//!
//! The seam between the slot array and the collision-resolution strategy. A strategy decides two
//! things: which capacities it can cycle through completely, and how far apart consecutive probes
//! for a given key are. Both linear probing (`probe(x) = 13 * x`) and double hashing
//! (`probe(x) = x * step(key)`) are arithmetic progressions modulo the capacity, so one iterator,
//! [`ProbeSequence`], walks either of them.

use crate::cs::error::Result;

/// Capacity rules a probing strategy imposes on the slot array.
pub trait ProbeStrategy {
    /// Smallest capacity at or above `requested` for which every probe sequence is a full cycle.
    fn normalize_capacity(requested: usize) -> Result<usize>;

    /// Capacity to rebuild into when a table of `capacity` slots reaches its threshold.
    fn grow_capacity(capacity: usize) -> Result<usize>;
}

/// Per-key probe step of a strategy.
///
/// `Q` is the type the lookup is performed with, which may be a borrowed form of the stored key.
/// Implementations must return the same step for a key and any of its borrowed forms.
pub trait ProbeStep<Q: ?Sized>: ProbeStrategy {
    /// Distance between consecutive probes for `key`; always in `1..capacity`.
    fn step(key: &Q, capacity: usize) -> usize;
}

/// Reduces a hash to a slot index.
#[inline]
pub(crate) fn home_slot(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Slot indices `offset + x * step (mod capacity)` for `x = 0, 1, ..., capacity - 1`.
///
/// When `gcd(step, capacity) == 1` this is a permutation of all slots.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    index: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSequence {
    pub fn new(offset: usize, step: usize, capacity: usize) -> Self {
        debug_assert!(capacity > 0 && offset < capacity);
        Self {
            index: offset,
            step: step % capacity.max(1),
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        // index + step without overflowing near usize::MAX
        let gap = self.capacity - self.step;
        self.index = if current >= gap {
            current - gap
        } else {
            current + self.step
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
