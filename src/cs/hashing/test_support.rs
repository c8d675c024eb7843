//! Deterministic hashers and key types for the table tests.

use std::hash::{BuildHasherDefault, Hash, Hasher};

use rand::Rng;

use super::secondary::SecondaryHash;

/// Hashes a `u64` to itself, so a key's home slot is `key % capacity`.
#[derive(Debug, Default)]
pub(crate) struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ b as u64;
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

pub(crate) type Identity = BuildHasherDefault<IdentityHasher>;

/// A key whose primary hash is `.0` and whose secondary hash is `.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stepped(pub u64, pub u64);

impl Hash for Stepped {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0);
    }
}

impl SecondaryHash for Stepped {
    fn secondary_hash(&self) -> u64 {
        self.1
    }
}

/// Operation mix for randomized comparisons against `std::collections::HashMap`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ModelOp {
    Insert,
    Remove,
    Get,
    Contains,
}

impl ModelOp {
    pub(crate) fn pick<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..10) {
            0..=3 => ModelOp::Insert,
            4..=6 => ModelOp::Remove,
            7..=8 => ModelOp::Get,
            _ => ModelOp::Contains,
        }
    }
}
