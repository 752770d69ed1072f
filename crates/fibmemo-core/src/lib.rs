//! # fibmemo-core
//!
//! Memoizing Fibonacci engine backed by a seeded, write-once cache of
//! arbitrary-precision values.

pub mod cache;
pub mod constants;
pub mod engine;
pub mod memory_budget;
pub mod observer;
pub mod observers;
pub mod progress;
pub mod shared;
pub mod strategy;

// Re-exports
pub use cache::FibCache;
pub use constants::{
    exit_codes, DEFAULT_RECURSION_LIMIT, PROGRESS_REPORT_THRESHOLD, SEED_MAX_INDEX, SEED_TABLE,
};
pub use engine::{EngineStats, FibEngine, FibError};
pub use memory_budget::CacheEstimate;
pub use observer::ProgressObserver;
pub use progress::{CancellationToken, ProgressUpdate};
pub use shared::SharedEngine;
pub use strategy::Strategy;

use num_bigint::BigUint;

/// Compute F(n) on a fresh engine.
///
/// Convenient for one-off values; keep a `FibEngine` around to reuse its
/// cache across requests.
///
/// # Example
/// ```
/// assert_eq!(fibmemo_core::fibonacci(10).to_string(), "55");
/// assert_eq!(fibmemo_core::fibonacci(0).to_string(), "0");
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> BigUint {
    FibEngine::new().fib_owned(n)
}
