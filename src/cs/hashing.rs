//! Open-addressing hash tables.
//!
//! This module provides one slot-array table with two interchangeable probe strategies:
//! - Linear probing with a fixed stride of 13 ([`LinearProbingHashTable`])
//! - Double hashing with a key-supplied secondary hash ([`DoubleHashingTable`])
//!
//! Both share tombstone-based removal, compaction of entries into tombstones on lookup, and a
//! capacity policy that keeps every probe sequence a full cycle over the slot array.

pub mod capacity;
pub mod double_hashing;
pub mod linear_probing;
pub mod open_addressing;
pub mod probe;
pub mod secondary;

#[cfg(test)]
pub(crate) mod test_support;

pub use double_hashing::{DoubleHashing, DoubleHashingTable};
pub use linear_probing::{LinearProbing, LinearProbingHashTable};
pub use open_addressing::OpenAddressingTable;
pub use probe::{ProbeSequence, ProbeStep, ProbeStrategy};
pub use secondary::{fnv1a_of, Fnv1aBuildHasher, Fnv1aHasher, SecondaryHash};
