//! # Double Hashing
//!
//! Probes slots `home, home + s, home + 2s, ...` modulo the capacity, where the step `s` comes from
//! the key's [`SecondaryHash`]. Keys that share a home slot usually get different steps, so they
//! leave the collision along different paths. A step of zero is bumped to one.
//!
//! Every nonzero step generates all residues only when the capacity is prime, so capacities are
//! normalized to the next prime. On growth the table moves to the next power of two above the
//! current capacity and then to the next prime at or above that.
//!
//! ## Example
//! ```rust
//! use probe_table::DoubleHashingTable;
//!
//! let mut table = DoubleHashingTable::new(8, 0.75).unwrap();
//! assert_eq!(table.capacity(), 11);
//! table.insert(42u64, "answer");
//! assert_eq!(table.get(&42), Some(&"answer"));
//! ```

use std::collections::hash_map::RandomState;

use super::capacity;
use super::open_addressing::OpenAddressingTable;
use super::probe::{ProbeStep, ProbeStrategy};
use super::secondary::SecondaryHash;
use crate::cs::error::Result;

/// Probing strategy whose step is derived from a secondary hash of the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleHashing;

impl ProbeStrategy for DoubleHashing {
    fn normalize_capacity(requested: usize) -> Result<usize> {
        capacity::next_prime(requested)
    }

    fn grow_capacity(capacity: usize) -> Result<usize> {
        capacity::grow_prime(capacity)
    }
}

impl<Q: SecondaryHash + ?Sized> ProbeStep<Q> for DoubleHashing {
    #[inline]
    fn step(key: &Q, capacity: usize) -> usize {
        match key.secondary_hash() % capacity as u64 {
            0 => 1,
            s => s as usize,
        }
    }
}

/// Open-addressing table using double hashing. Keys must implement [`SecondaryHash`].
pub type DoubleHashingTable<K, V, S = RandomState> = OpenAddressingTable<K, V, DoubleHashing, S>;
