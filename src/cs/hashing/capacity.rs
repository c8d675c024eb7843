//! # Capacity Policy
//!
//! Sizing rules shared by the open-addressing tables. Each probe strategy needs the slot count to
//! have a structural property so that its probe sequence cycles through every slot:
//!
//! - **Linear probing** with stride 13 needs `gcd(13, capacity) == 1`.
//! - **Double hashing** needs a prime capacity so any nonzero step is invertible.
//!
//! All arithmetic is checked; a capacity that cannot be represented is reported as
//! [`Error::CapacityOverflow`] instead of wrapping.

use num_integer::gcd;
use num_prime::nt_funcs::is_prime64;

use crate::cs::error::{Error, Result};

/// Smallest capacity a table is ever built with, and the capacity used by `Default`.
pub const DEFAULT_CAPACITY: usize = 3;

/// Default ratio of used buckets to capacity at which the table grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Distance between consecutive probes in linear probing.
pub const LINEAR_STRIDE: usize = 13;

/// Returns true if a linear probe walk over `capacity` slots visits every slot.
pub fn is_coprime_with_stride(capacity: usize) -> bool {
    capacity != 0 && gcd(LINEAR_STRIDE, capacity) == 1
}

/// Returns true if `capacity` is prime.
pub fn is_prime(capacity: usize) -> bool {
    is_prime64(capacity as u64)
}

/// Smallest capacity `>= max(requested, DEFAULT_CAPACITY)` that is coprime with [`LINEAR_STRIDE`].
pub fn next_coprime(requested: usize) -> Result<usize> {
    let mut capacity = requested.max(DEFAULT_CAPACITY);
    while !is_coprime_with_stride(capacity) {
        capacity = capacity.checked_add(1).ok_or(Error::CapacityOverflow)?;
    }
    Ok(capacity)
}

/// Smallest prime `>= max(requested, DEFAULT_CAPACITY)`.
pub fn next_prime(requested: usize) -> Result<usize> {
    let mut capacity = requested.max(DEFAULT_CAPACITY);
    while !is_prime(capacity) {
        capacity = capacity.checked_add(1).ok_or(Error::CapacityOverflow)?;
    }
    Ok(capacity)
}

/// Linear growth: `2 * capacity + 1`, then the next stride-coprime value.
pub fn grow_linear(capacity: usize) -> Result<usize> {
    let doubled = capacity
        .checked_mul(2)
        .and_then(|c| c.checked_add(1))
        .ok_or(Error::CapacityOverflow)?;
    next_coprime(doubled)
}

/// Double-hash growth: the next power of two strictly above `capacity`, then the next prime.
pub fn grow_prime(capacity: usize) -> Result<usize> {
    let power = capacity
        .checked_add(1)
        .and_then(usize::checked_next_power_of_two)
        .ok_or(Error::CapacityOverflow)?;
    next_prime(power)
}

/// Number of used buckets at which a table of `capacity` slots must grow before inserting.
///
/// This is `floor(capacity * load_factor)` kept within `1..capacity`, so at least one slot is
/// always genuinely empty.
pub fn threshold(capacity: usize, load_factor: f64) -> usize {
    let raw = (capacity as f64 * load_factor).floor() as usize;
    raw.clamp(1, capacity.saturating_sub(1).max(1))
}

/// Rejects load factors that cannot drive a growth policy.
pub fn validate_load_factor(load_factor: f64) -> Result<()> {
    if load_factor.is_nan() || load_factor.is_infinite() || load_factor <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "load factor must be a positive finite number, got {}",
            load_factor
        )));
    }
    Ok(())
}
