//! # Secondary Hashing
//!
//! Double hashing derives the probe step from a second hash of the key, computed independently of
//! the primary hash that picks the home slot. Keys opt in through the [`SecondaryHash`] trait.
//!
//! The provided implementations run the key's `Hash` impl through a 64-bit **FNV-1a** hasher.
//! The primary hash of the tables defaults to SipHash (`RandomState`), so the two are unrelated.
//! Because `Borrow` requires a key and its borrowed form to hash identically, `String`/`str` and
//! `Vec<T>`/`[T]` produce the same secondary hash and borrowed lookups probe the same slots.
//!
//! Custom key types can implement the trait by hand, or reuse [`fnv1a_of`]:
//!
//! ```rust
//! use probe_table::cs::hashing::secondary::{fnv1a_of, SecondaryHash};
//!
//! #[derive(Hash, PartialEq, Eq)]
//! struct UserId(u32);
//!
//! impl SecondaryHash for UserId {
//!     fn secondary_hash(&self) -> u64 {
//!         fnv1a_of(self)
//!     }
//! }
//! ```

use std::hash::{BuildHasher, Hash, Hasher};

/// Offset basis and prime for 64-bit FNV-1a.
const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// A hash of the key used only to compute the double-hashing probe step.
pub trait SecondaryHash {
    fn secondary_hash(&self) -> u64;
}

/// 64-bit FNV-1a, usable as a `std::hash::Hasher`.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1aHasher {
    hash: u64,
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self {
            hash: FNV64_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash ^= b as u64;
            self.hash = self.hash.wrapping_mul(FNV64_PRIME);
        }
    }
}

/// `BuildHasher` producing [`Fnv1aHasher`]s, for callers who want a deterministic primary hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1aBuildHasher;

impl BuildHasher for Fnv1aBuildHasher {
    type Hasher = Fnv1aHasher;

    fn build_hasher(&self) -> Fnv1aHasher {
        Fnv1aHasher::default()
    }
}

/// FNV-1a over the `Hash` encoding of `value`.
pub fn fnv1a_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Fnv1aHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

macro_rules! impl_secondary_hash {
    ($($t:ty),* $(,)?) => {
        $(
            impl SecondaryHash for $t {
                #[inline]
                fn secondary_hash(&self) -> u64 {
                    fnv1a_of(self)
                }
            }
        )*
    };
}

impl_secondary_hash!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, str, String,
);

impl<T: Hash> SecondaryHash for [T] {
    fn secondary_hash(&self) -> u64 {
        fnv1a_of(self)
    }
}

impl<T: Hash> SecondaryHash for Vec<T> {
    fn secondary_hash(&self) -> u64 {
        fnv1a_of(self)
    }
}

impl<A: Hash, B: Hash> SecondaryHash for (A, B) {
    fn secondary_hash(&self) -> u64 {
        fnv1a_of(self)
    }
}

impl<T: SecondaryHash + ?Sized> SecondaryHash for &T {
    fn secondary_hash(&self) -> u64 {
        (**self).secondary_hash()
    }
}

impl<T: SecondaryHash + ?Sized> SecondaryHash for Box<T> {
    fn secondary_hash(&self) -> u64 {
        (**self).secondary_hash()
    }
}
