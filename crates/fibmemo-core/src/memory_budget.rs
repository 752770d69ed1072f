//! Cache memory estimation and validation.
//!
//! The cache keeps every value up to the highest requested index, so its
//! size grows with the square of that index. Requests are checked against
//! the estimate before any entry is computed; an allocation failure in the
//! middle of a fill would abort the process.

use std::mem::size_of;

use num_bigint::BigUint;

/// log2 of the golden ratio: F(k) has about `k * LOG2_PHI` bits.
const LOG2_PHI: f64 = 0.694_241_913_630_617_3;

const MIB: u64 = 1024 * 1024;

/// Largest allocation size the platform can address.
#[allow(clippy::cast_sign_loss)]
const ADDRESSABLE_BYTES: u64 = isize::MAX as u64;

/// Memory estimate for a cache holding F(0)..=F(n).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEstimate {
    /// Index the estimate was made for.
    pub n: u64,
    /// Bytes held by the digit buffers of all values.
    pub value_bytes: u64,
    /// Bytes held by the cache vector itself, growth slack included.
    pub table_bytes: u64,
    /// Total estimated bytes.
    pub total_bytes: u64,
}

impl CacheEstimate {
    /// Estimate the cache size after filling it up to F(n).
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn estimate(n: u64) -> Self {
        let entries = n as f64 + 1.0;
        // Sum of k * LOG2_PHI bits for k in 0..=n, plus one partially used
        // 64-bit digit per value.
        let bits = LOG2_PHI * (n as f64) * entries / 2.0;
        let value_bytes = (bits / 8.0 + entries * 8.0).ceil() as u64;
        // Vec doubling can leave up to half the table unused.
        let table_bytes = (entries * 2.0 * size_of::<BigUint>() as f64).ceil() as u64;

        Self {
            n,
            value_bytes,
            table_bytes,
            total_bytes: value_bytes.saturating_add(table_bytes),
        }
    }

    /// Whether a cache of this size can be addressed at all.
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        self.total_bytes <= ADDRESSABLE_BYTES
            && self
                .n
                .checked_add(1)
                .is_some_and(|len| usize::try_from(len).is_ok())
    }

    /// Check if the cache fits within the given limit in bytes.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<u64>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }

    /// Total in whole MiB, rounded up.
    #[must_use]
    pub fn total_mib(&self) -> u64 {
        self.total_bytes.div_ceil(MIB)
    }
}

/// Parse a memory limit such as `"256M"`, `"2G"`, `"512K"` or `"4096"`.
///
/// `"0"`, `"unlimited"` and the empty string mean no limit.
pub fn parse_memory_limit(s: &str) -> Result<Option<u64>, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }

    let upper = s.to_ascii_uppercase();
    let (num_str, multiplier) = if let Some(n) = upper.strip_suffix('G') {
        (n, 1024 * MIB)
    } else if let Some(n) = upper.strip_suffix('M') {
        (n, MIB)
    } else if let Some(n) = upper.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1)
    } else {
        (upper.as_str(), 1)
    };

    let value: u64 = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit '{s}': {e}"))?;
    let bytes = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("memory limit '{s}' is too large"))?;
    Ok((bytes != 0).then_some(bytes))
}

/// Format a byte limit for messages (`"256 MiB"`).
#[must_use]
pub fn format_limit(bytes: u64) -> String {
    format!("{} MiB", bytes.div_ceil(MIB))
}
