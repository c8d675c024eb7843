//! # Linear Probing
//!
//! Probes slots `home, home + 13, home + 26, ...` modulo the capacity. A fixed stride larger than
//! one spreads a cluster over the array instead of growing it contiguously. The sequence only
//! reaches every slot when the stride and the capacity are coprime, so capacities are normalized to
//! the next value with `gcd(13, capacity) == 1` and grow as `2 * capacity + 1`.
//!
//! ## Example
//! ```rust
//! use probe_table::LinearProbingHashTable;
//!
//! let mut scores = LinearProbingHashTable::with_capacity(13).unwrap();
//! assert_eq!(scores.capacity(), 14);
//! scores.insert(String::from("ada"), 36);
//! assert_eq!(scores.get("ada"), Some(&36));
//! ```

use std::collections::hash_map::RandomState;

use super::capacity::{self, LINEAR_STRIDE};
use super::open_addressing::OpenAddressingTable;
use super::probe::{ProbeStep, ProbeStrategy};
use crate::cs::error::Result;

/// Fixed-stride probing strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProbing;

impl ProbeStrategy for LinearProbing {
    fn normalize_capacity(requested: usize) -> Result<usize> {
        capacity::next_coprime(requested)
    }

    fn grow_capacity(capacity: usize) -> Result<usize> {
        capacity::grow_linear(capacity)
    }
}

impl<Q: ?Sized> ProbeStep<Q> for LinearProbing {
    #[inline]
    fn step(_key: &Q, capacity: usize) -> usize {
        LINEAR_STRIDE % capacity
    }
}

/// Open-addressing table using linear probing with stride 13.
pub type LinearProbingHashTable<K, V, S = RandomState> = OpenAddressingTable<K, V, LinearProbing, S>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::error::Error;
    use crate::cs::hashing::probe::ProbeSequence;
    use crate::cs::hashing::test_support::Identity;
    use std::collections::HashSet;

    #[test]
    fn test_capacity_is_coprime_with_stride() {
        for requested in [0, 3, 12, 13, 26, 39, 64, 169] {
            let table: LinearProbingHashTable<u32, u32> =
                LinearProbingHashTable::with_capacity(requested).unwrap();
            assert!(table.capacity() >= requested.max(3));
            assert!(capacity::is_coprime_with_stride(table.capacity()));
        }
        let table: LinearProbingHashTable<u32, u32> =
            LinearProbingHashTable::with_capacity(26).unwrap();
        assert_eq!(table.capacity(), 27);
    }

    #[test]
    fn test_step_covers_every_slot() {
        for capacity in [3, 7, 14, 27, 100] {
            let step = <LinearProbing as ProbeStep<str>>::step("any", capacity);
            let seen: HashSet<usize> = ProbeSequence::new(capacity / 2, step, capacity).collect();
            assert_eq!(seen.len(), capacity);
        }
    }

    #[test]
    fn test_growth_sequence() {
        let mut table: LinearProbingHashTable<u64, u64, Identity> =
            LinearProbingHashTable::with_hasher(3, 0.75, Identity::default()).unwrap();
        let mut capacities = vec![table.capacity()];
        for k in 0..40 {
            table.insert(k, k);
            if table.capacity() != *capacities.last().unwrap() {
                capacities.push(table.capacity());
            }
        }
        assert_eq!(capacities, vec![3, 7, 15, 31, 63]);
        for k in 0..40 {
            assert_eq!(table.get(&k), Some(&k));
        }
    }

    #[test]
    fn test_basic_ops() {
        let mut table = LinearProbingHashTable::new(3, 0.75).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.insert("hello".to_string(), 1), None);
        assert_eq!(table.insert("world".to_string(), 2), None);
        assert_eq!(table.insert("rust".to_string(), 3), None);
        assert_eq!(table.len(), 3);

        assert_eq!(table.get("hello"), Some(&1));
        assert_eq!(table.get("missing"), None);
        assert_eq!(table.remove("world"), Some(2));
        assert_eq!(table.remove("world"), None);
        assert_eq!(table.len(), 2);

        assert_eq!(table.insert("hello".to_string(), 10), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("hello"), Some(&10));

        for i in 0..20 {
            table.insert(format!("key{}", i), i);
        }
        for i in 0..20 {
            assert_eq!(table.get(format!("key{}", i).as_str()), Some(&i));
        }
        assert!(capacity::is_coprime_with_stride(table.capacity()));
    }

    #[test]
    fn test_invalid_load_factor() {
        assert!(matches!(
            LinearProbingHashTable::<u8, u8>::new(3, 0.0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
