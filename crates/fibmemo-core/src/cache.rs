//! Write-once Fibonacci cache.
//!
//! Every computation fills indices in increasing order, so the cached keys
//! always form the contiguous prefix `0..len`. Values are stored densely and
//! the only mutation is appending the value for index `len`.

use std::ops::Index;

use num_bigint::BigUint;

use crate::constants::SEED_TABLE;

/// Cache mapping an index `k` to `F(k)`.
#[derive(Debug, Clone)]
pub struct FibCache {
    values: Vec<BigUint>,
}

impl FibCache {
    /// Create a cache seeded with F(0)..=F(10).
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            values: SEED_TABLE.iter().copied().map(BigUint::from).collect(),
        }
    }

    /// Get the cached value for `n`, if present.
    #[must_use]
    pub fn get(&self, n: u64) -> Option<&BigUint> {
        usize::try_from(n).ok().and_then(|i| self.values.get(i))
    }

    /// Whether `n` has been cached.
    #[inline]
    #[must_use]
    pub fn contains(&self, n: u64) -> bool {
        n < self.len()
    }

    /// Number of cached entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.values.len() as u64
    }

    /// Always false: the seed table is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Highest cached index.
    #[must_use]
    pub fn highest_index(&self) -> u64 {
        self.len() - 1
    }

    /// Iterate over `(index, value)` pairs in increasing index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &BigUint)> {
        self.values.iter().enumerate().map(|(i, v)| (i as u64, v))
    }

    /// Append F(len) computed from the two highest entries.
    ///
    /// Returns the index that was written.
    pub(crate) fn extend_one(&mut self) -> u64 {
        let next = self.values.len();
        let value = &self.values[next - 1] + &self.values[next - 2];
        self.values.push(value);
        next as u64
    }
}

impl Default for FibCache {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Index<u64> for FibCache {
    type Output = BigUint;

    #[allow(clippy::cast_possible_truncation)]
    fn index(&self, n: u64) -> &BigUint {
        &self.values[n as usize]
    }
}
