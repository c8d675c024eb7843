//! # Open Addressing Hash Table
//!
//! This module provides the slot array shared by the open-addressing tables in this crate. The
//! collision-resolution strategy is a type parameter (`P`), so the same core drives both
//! [`LinearProbingHashTable`](super::linear_probing::LinearProbingHashTable) and
//! [`DoubleHashingTable`](super::double_hashing::DoubleHashingTable).
//!
//! ## Key Features
//! - **Generic** key-value pairs (`K: Hash + Eq, V`) with a customizable `BuildHasher`.
//! - **Tagged slots**: every slot is `Empty`, `Tombstone` or `Occupied(key, value)`.
//! - **Tombstone reuse**: inserts fill the first tombstone on the key's probe path.
//! - **Compaction on lookup**: a key found behind a tombstone is moved into that tombstone, so
//!   later lookups of the same key stop earlier.
//! - **Automatic growth**: before an insert that would push the used buckets to the threshold, the
//!   table is rebuilt at a larger capacity and tombstones are discarded.
//!
//! Lookups that may relocate an entry take `&mut self`. [`OpenAddressingTable::peek`] is the
//! read-only lookup.
//!
//! **Note**: The table is not thread-safe. Wrap it in a mutex to share it across threads.
//!
//! ## Example
//! ```rust
//! use probe_table::LinearProbingHashTable;
//!
//! let mut table = LinearProbingHashTable::new(3, 0.75).unwrap();
//! table.insert("apple", 1);
//! table.insert("pear", 2);
//! assert_eq!(table.get("apple"), Some(&1));
//! assert_eq!(table.remove("pear"), Some(2));
//! assert!(!table.contains_key("pear"));
//! ```

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::marker::PhantomData;
use std::mem;

use log::{debug, trace};

use super::capacity::{self, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
use super::probe::{home_slot, ProbeSequence, ProbeStep, ProbeStrategy};
use crate::cs::error::Result;

/// A slot is `Empty`, a `Tombstone` (was occupied, then removed or relocated), or `Occupied`.
#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Where a probe walk for a key ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key is stored at `index`. `tombstone` is the first tombstone passed on the way.
    Found {
        index: usize,
        tombstone: Option<usize>,
    },
    /// The walk reached an empty slot without finding the key.
    Vacant {
        index: usize,
        tombstone: Option<usize>,
    },
    /// Every slot was visited without finding the key or an empty slot.
    Exhausted { tombstone: Option<usize> },
}

/// An open-addressing hash table over a fixed-length slot array.
///
/// `P` selects the probe sequence, `S` the primary hasher.
#[derive(Clone)]
pub struct OpenAddressingTable<K, V, P, S = RandomState> {
    slots: Vec<Slot<K, V>>,
    /// Number of `Occupied` slots.
    key_count: usize,
    /// Number of `Occupied` or `Tombstone` slots since the last rebuild.
    used_buckets: usize,
    /// Used-bucket count at which the next insert grows the table.
    threshold: usize,
    load_factor: f64,
    hash_builder: S,
    strategy: PhantomData<P>,
}

/// Allocates `capacity` empty slots, reporting allocation failure instead of aborting.
fn empty_slots<K, V>(capacity: usize) -> Result<Vec<Slot<K, V>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

impl<K, V, P: ProbeStrategy> OpenAddressingTable<K, V, P, RandomState> {
    /// Creates a table able to hold `capacity` slots (rounded up to what the strategy accepts)
    /// that grows once `floor(capacity * load_factor)` buckets are used.
    ///
    /// Fails with `InvalidArgument` if `load_factor` is not a positive finite number.
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::with_hasher(capacity, load_factor, RandomState::new())
    }

    /// Creates a table with the default load factor.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_LOAD_FACTOR)
    }
}

impl<K, V, P: ProbeStrategy, S> OpenAddressingTable<K, V, P, S> {
    /// Creates a table that hashes keys with `hash_builder`.
    pub fn with_hasher(capacity: usize, load_factor: f64, hash_builder: S) -> Result<Self> {
        capacity::validate_load_factor(load_factor)?;
        let capacity = P::normalize_capacity(capacity)?;
        let slots = empty_slots(capacity)?;
        Ok(Self {
            slots,
            key_count: 0,
            used_buckets: 0,
            threshold: capacity::threshold(capacity, load_factor),
            load_factor,
            hash_builder,
            strategy: PhantomData,
        })
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S> {
    /// Returns the number of key-value pairs in the table.
    pub fn len(&self) -> usize {
        self.key_count
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied or tombstoned slots since the last rebuild.
    pub fn used_buckets(&self) -> usize {
        self.used_buckets
    }

    /// Returns the number of tombstones.
    pub fn tombstones(&self) -> usize {
        self.used_buckets - self.key_count
    }

    /// Returns the used-bucket count at which the next insert rebuilds the table.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the ratio of used buckets to capacity at which the table grows.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns a reference to the table's `BuildHasher`.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry and tombstone. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        debug!(
            "cleared table: {} keys, {} used buckets, capacity {}",
            self.key_count,
            self.used_buckets,
            self.slots.len()
        );
        self.key_count = 0;
        self.used_buckets = 0;
    }

    /// Iterates over all `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }

    /// Iterates over all keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over all values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Iterates mutably over all values in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        })
    }

    /// Swaps the slot at `index` for a tombstone and returns its entry.
    /// A slot that was not occupied is left untouched.
    fn take_occupied(&mut self, index: usize) -> Option<(K, V)> {
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(k, v) => Some((k, v)),
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Moves the entry at `from` into the tombstone at `to`, leaving a tombstone behind.
    fn relocate(&mut self, from: usize, to: usize) {
        if let Some((k, v)) = self.take_occupied(from) {
            trace!("relocating entry from slot {} to tombstone {}", from, to);
            self.slots[to] = Slot::Occupied(k, v);
        }
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value for an equal key.
    ///
    /// # Panics
    ///
    /// Panics if growing the table overflows `usize` or the allocator fails, like `Vec::push`.
    /// Use [`try_insert`](Self::try_insert) to handle those cases.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        P: ProbeStep<K>,
    {
        match self.try_insert(key, value) {
            Ok(old) => old,
            Err(e) => panic!("open addressing table growth failed: {}", e),
        }
    }

    /// Inserts a key-value pair, returning the previous value for an equal key.
    ///
    /// If a required rebuild cannot be performed the error is returned and the table is left
    /// exactly as it was.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>>
    where
        P: ProbeStep<K>,
    {
        self.reserve_bucket()?;
        Ok(self.place(key, value))
    }

    /// Returns the value for `key`.
    ///
    /// If the key sits behind a tombstone on its probe path it is moved into the first such
    /// tombstone before returning, which shortens later lookups.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        let index = self.locate(key)?;
        match &self.slots[index] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value for `key`, compacting like [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        let index = self.locate(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns true if the table holds `key`, compacting like [`get`](Self::get).
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        self.locate(key).is_some()
    }

    /// Returns the value for `key` without relocating anything.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        match self.find(key) {
            Probe::Found { index, .. } => match &self.slots[index] {
                Slot::Occupied(_, v) => Some(v),
                _ => None,
            },
            _ => None,
        }
    }

    /// Removes `key`, returning its value. The slot becomes a tombstone until the next rebuild.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        match self.find(key) {
            Probe::Found { index, .. } => {
                let (_, v) = self.take_occupied(index)?;
                self.key_count -= 1;
                Some(v)
            }
            _ => None,
        }
    }

    fn hash_key<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Walks the probe sequence of `key` until it finds the key, an empty slot, or has visited
    /// every slot once.
    fn find<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        let capacity = self.slots.len();
        let offset = home_slot(self.hash_key(key), capacity);
        let step = P::step(key, capacity);

        let mut tombstone = None;
        for index in ProbeSequence::new(offset, step, capacity) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant { index, tombstone },
                Slot::Tombstone => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                Slot::Occupied(k, _) if <K as Borrow<Q>>::borrow(k) == key => {
                    return Probe::Found { index, tombstone }
                }
                Slot::Occupied(..) => {}
            }
        }
        Probe::Exhausted { tombstone }
    }

    /// Finds `key` and pulls it forward into the first tombstone on its path.
    /// Returns the slot the entry ends up in.
    fn locate<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        P: ProbeStep<Q>,
    {
        match self.find(key) {
            Probe::Found {
                index,
                tombstone: Some(j),
            } => {
                self.relocate(index, j);
                Some(j)
            }
            Probe::Found {
                index,
                tombstone: None,
            } => Some(index),
            _ => None,
        }
    }

    /// Writes the entry without consulting the threshold. The caller guarantees a free bucket.
    fn place(&mut self, key: K, value: V) -> Option<V>
    where
        P: ProbeStep<K>,
    {
        match self.find(&key) {
            Probe::Found {
                index,
                tombstone: None,
            } => match &mut self.slots[index] {
                Slot::Occupied(_, v) => Some(mem::replace(v, value)),
                _ => None,
            },
            Probe::Found {
                index,
                tombstone: Some(j),
            } => {
                let old = self.take_occupied(index).map(|(_, v)| v);
                trace!("moving updated entry from slot {} to tombstone {}", index, j);
                self.slots[j] = Slot::Occupied(key, value);
                old
            }
            Probe::Vacant {
                index,
                tombstone: None,
            } => {
                self.slots[index] = Slot::Occupied(key, value);
                self.used_buckets += 1;
                self.key_count += 1;
                None
            }
            Probe::Vacant {
                tombstone: Some(j), ..
            }
            | Probe::Exhausted { tombstone: Some(j) } => {
                self.slots[j] = Slot::Occupied(key, value);
                self.key_count += 1;
                None
            }
            Probe::Exhausted { tombstone: None } => unreachable!(
                "probe cycle over {} slots found no free bucket ({} used)",
                self.slots.len(),
                self.used_buckets
            ),
        }
    }

    /// Grows the table if the used buckets have reached the threshold, so the next placement
    /// has room.
    fn reserve_bucket(&mut self) -> Result<()>
    where
        P: ProbeStep<K>,
    {
        if self.used_buckets < self.threshold {
            return Ok(());
        }
        let mut capacity = self.slots.len();
        loop {
            capacity = P::grow_capacity(capacity)?;
            if self.key_count < capacity::threshold(capacity, self.load_factor) {
                break;
            }
        }
        self.rebuild(capacity)
    }

    /// Replaces the slot array with `capacity` empty slots and re-inserts every live entry in
    /// slot order. Tombstones are dropped.
    fn rebuild(&mut self, capacity: usize) -> Result<()>
    where
        P: ProbeStep<K>,
    {
        let fresh = empty_slots(capacity)?;
        let old_slots = mem::replace(&mut self.slots, fresh);
        let old_capacity = old_slots.len();
        let dropped = self.tombstones();

        self.threshold = capacity::threshold(capacity, self.load_factor);
        self.key_count = 0;
        self.used_buckets = 0;

        for slot in old_slots {
            if let Slot::Occupied(k, v) = slot {
                self.place(k, v);
            }
        }
        debug!(
            "resized table from {} to {} slots: {} keys, {} tombstones dropped, threshold {}",
            old_capacity, capacity, self.key_count, dropped, self.threshold
        );
        Ok(())
    }
}

impl<K, V, P: ProbeStrategy, S: Default> Default for OpenAddressingTable<K, V, P, S> {
    /// An empty table with the default capacity and load factor.
    fn default() -> Self {
        let capacity = P::normalize_capacity(DEFAULT_CAPACITY).unwrap_or(DEFAULT_CAPACITY);
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            key_count: 0,
            used_buckets: 0,
            threshold: capacity::threshold(capacity, DEFAULT_LOAD_FACTOR),
            load_factor: DEFAULT_LOAD_FACTOR,
            hash_builder: S::default(),
            strategy: PhantomData,
        }
    }
}

impl<K, V, P, S> Extend<(K, V)> for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStep<K>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, P, S> fmt::Debug for OpenAddressingTable<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, P, S> fmt::Display for OpenAddressingTable<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}
