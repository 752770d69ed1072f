//! The memoizing Fibonacci engine.
//!
//! `FibEngine` owns a seeded `FibCache` and answers `fib(n)` from it,
//! extending the cache on a miss with either the recursive or the
//! bottom-up strategy. Each index is computed at most once per engine.

use num_bigint::BigUint;
use serde::Serialize;
use tracing::debug;

use crate::cache::FibCache;
use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::memory_budget::{format_limit, CacheEstimate};
use crate::observer::ProgressObserver;
use crate::progress::{CancellationToken, ProgressUpdate};
use crate::strategy::Strategy;

/// Error type for engine computations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// Calculation was cancelled.
    #[error("calculation cancelled")]
    Cancelled,

    /// The index cannot be addressed on this platform.
    #[error("index {0} is too large for this platform")]
    IndexTooLarge(u64),

    /// Caching every value up to the index would exceed the memory limit.
    #[error("caching F(0)..=F({n}) needs about {estimated_mib} MiB, over the {limit} limit")]
    MemoryLimit {
        n: u64,
        estimated_mib: u64,
        limit: String,
    },
}

/// Counters describing how an engine served its requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Total number of requests.
    pub requests: u64,
    /// Requests answered straight from the cache.
    pub hits: u64,
    /// Cache entries computed by this engine (excluding the seed table).
    pub computed: u64,
}

/// Memoizing Fibonacci engine.
///
/// # Example
/// ```
/// use fibmemo_core::engine::FibEngine;
///
/// let mut engine = FibEngine::new();
/// assert_eq!(engine.fib(10).to_string(), "55");
/// assert_eq!(engine.fib(100).to_string(), "354224848179261915075");
/// ```
#[derive(Debug, Clone)]
pub struct FibEngine {
    cache: FibCache,
    strategy: Strategy,
    memory_limit: Option<u64>,
    stats: EngineStats,
}

impl FibEngine {
    /// Create an engine with a freshly seeded cache and the default strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Strategy::default())
    }

    /// Create an engine with a freshly seeded cache and the given strategy.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            cache: FibCache::seeded(),
            strategy,
            memory_limit: None,
            stats: EngineStats::default(),
        }
    }

    /// Cap the cache size in bytes. `None` means unlimited.
    #[must_use]
    pub fn with_memory_limit(mut self, limit: Option<u64>) -> Self {
        self.memory_limit = limit;
        self
    }

    #[must_use]
    pub fn memory_limit(&self) -> Option<u64> {
        self.memory_limit
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn cache(&self) -> &FibCache {
        &self.cache
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Return F(n), computing and caching any missing entries.
    ///
    /// # Panics
    /// Panics if the cache up to `n` is not addressable or would exceed the
    /// memory limit. Use [`FibEngine::try_fib`] to handle that case.
    pub fn fib(&mut self, n: u64) -> &BigUint {
        if let Err(e) = self.check_request(n) {
            panic!("cannot compute F({n}): {e}");
        }
        self.fill(n)
    }

    /// Return F(n), or an error if caching it would not fit in memory.
    pub fn try_fib(&mut self, n: u64) -> Result<&BigUint, FibError> {
        self.check_request(n)?;
        Ok(self.fill(n))
    }

    /// Check that the cache can grow to hold F(n) before any work starts.
    ///
    /// Cached indices always pass.
    pub fn check_request(&self, n: u64) -> Result<(), FibError> {
        if self.cache.contains(n) {
            return Ok(());
        }
        let estimate = CacheEstimate::estimate(n);
        if !estimate.is_addressable() {
            return Err(FibError::IndexTooLarge(n));
        }
        if !estimate.fits_in(self.memory_limit) {
            let limit = self.memory_limit.map(format_limit).unwrap_or_default();
            debug!(n, estimated_mib = estimate.total_mib(), %limit, "request over memory limit");
            return Err(FibError::MemoryLimit {
                n,
                estimated_mib: estimate.total_mib(),
                limit,
            });
        }
        Ok(())
    }

    fn fill(&mut self, n: u64) -> &BigUint {
        self.stats.requests += 1;
        if self.cache.contains(n) {
            self.stats.hits += 1;
            return &self.cache[n];
        }

        match self.strategy {
            Strategy::Iterative => self.fill_to(n),
            Strategy::Recursive { max_depth } => {
                let depth = n - self.cache.highest_index();
                if depth > max_depth as u64 {
                    debug!(n, depth, max_depth, "recursion too deep, filling bottom-up");
                    self.fill_to(n);
                } else {
                    self.memoize(n);
                }
            }
        }
        &self.cache[n]
    }

    /// Return an owned copy of F(n).
    pub fn fib_owned(&mut self, n: u64) -> BigUint {
        self.fib(n).clone()
    }

    /// Cancellable, observable variant of [`FibEngine::fib`].
    ///
    /// Bottom-up fills check `cancel` before every addition and report
    /// progress in 1% steps; recursive fills check it once up front. On
    /// cancellation every entry written so far stays cached.
    pub fn compute(
        &mut self,
        n: u64,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
    ) -> Result<&BigUint, FibError> {
        self.check_request(n)?;

        self.stats.requests += 1;
        if self.cache.contains(n) {
            self.stats.hits += 1;
        } else {
            match self.strategy {
                Strategy::Recursive { max_depth }
                    if n - self.cache.highest_index() <= max_depth as u64 =>
                {
                    cancel.check_cancelled()?;
                    self.memoize(n);
                }
                _ => self.fill_observed(n, cancel, observer)?,
            }
        }

        observer.on_progress(&ProgressUpdate::done(n));
        Ok(&self.cache[n])
    }

    #[allow(clippy::cast_precision_loss)]
    fn fill_observed(
        &mut self,
        n: u64,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
    ) -> Result<(), FibError> {
        let start = self.cache.len();
        let total = (n + 1 - start) as f64;
        let mut last_reported = 0.0;
        debug!(from = start, to = n, "extending cache");

        while !self.cache.contains(n) {
            cancel.check_cancelled()?;
            let index = self.cache.extend_one();
            self.stats.computed += 1;

            let progress = (index + 1 - start) as f64 / total;
            if progress - last_reported >= PROGRESS_REPORT_THRESHOLD {
                observer.on_progress(&ProgressUpdate::new(index, n, progress));
                last_reported = progress;
            }
        }
        Ok(())
    }

    fn fill_to(&mut self, n: u64) {
        debug!(from = self.cache.len(), to = n, "extending cache");
        while !self.cache.contains(n) {
            self.cache.extend_one();
            self.stats.computed += 1;
        }
    }

    /// F(n) = F(n-1) + F(n-2), top-down. The seed table ends the descent.
    fn memoize(&mut self, n: u64) {
        if self.cache.contains(n) {
            return;
        }
        self.memoize(n - 1);
        self.memoize(n - 2);
        let written = self.cache.extend_one();
        debug_assert_eq!(written, n);
        self.stats.computed += 1;
    }
}

impl Default for FibEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEED_TABLE;
    use crate::observers::{ChannelObserver, NoOpObserver};

    const F100: &str = "354224848179261915075";

    #[test]
    fn seeded_range_matches_table() {
        let mut engine = FibEngine::new();
        for (i, expected) in SEED_TABLE.iter().enumerate() {
            assert_eq!(*engine.fib(i as u64), BigUint::from(*expected));
        }
        assert_eq!(engine.stats().computed, 0);
        assert_eq!(engine.stats().hits, 11);
    }

    #[test]
    fn boundaries() {
        let mut engine = FibEngine::new();
        assert_eq!(engine.fib(0).to_string(), "0");
        assert_eq!(engine.fib(1).to_string(), "1");
    }

    #[test]
    fn fib_100_exceeds_u64() {
        let mut engine = FibEngine::new();
        assert_eq!(engine.fib(100).to_string(), F100);

        let mut recursive = FibEngine::with_strategy(Strategy::recursive());
        assert_eq!(recursive.fib(100).to_string(), F100);
    }

    #[test]
    fn second_request_is_a_cache_hit() {
        let mut engine = FibEngine::new();
        engine.fib(500);
        let after_first = engine.stats();
        assert_eq!(after_first.computed, 490);
        assert_eq!(after_first.hits, 0);

        engine.fib(500);
        let after_second = engine.stats();
        assert_eq!(after_second.computed, after_first.computed);
        assert_eq!(after_second.hits, 1);
        assert_eq!(after_second.requests, 2);
    }

    #[test]
    fn each_index_computed_once() {
        let mut engine = FibEngine::with_strategy(Strategy::recursive());
        engine.fib(50);
        engine.fib(30);
        engine.fib(60);
        assert_eq!(engine.stats().computed, 50);
        assert_eq!(engine.cache().highest_index(), 60);
    }

    #[test]
    fn recursive_beyond_depth_limit_falls_back() {
        let mut engine = FibEngine::with_strategy(Strategy::Recursive { max_depth: 8 });
        let mut reference = FibEngine::new();
        assert_eq!(engine.fib(5_000), reference.fib(5_000));
        assert_eq!(engine.cache().len(), reference.cache().len());
    }

    #[test]
    fn strategies_leave_identical_caches() {
        let mut iterative = FibEngine::new();
        let mut recursive = FibEngine::with_strategy(Strategy::recursive());
        iterative.fib(300);
        recursive.fib(300);
        assert!(iterative
            .cache()
            .iter()
            .zip(recursive.cache().iter())
            .all(|(a, b)| a == b));
        assert_eq!(iterative.cache().len(), recursive.cache().len());
    }

    #[test]
    fn fresh_engines_agree() {
        let a = FibEngine::new().fib_owned(777);
        let b = FibEngine::new().fib_owned(777);
        assert_eq!(a, b);
    }

    #[test]
    fn compute_matches_fib() {
        let cancel = CancellationToken::new();
        let mut engine = FibEngine::new();
        let value = engine.compute(100, &cancel, &NoOpObserver::new()).unwrap();
        assert_eq!(value.to_string(), F100);
        assert_eq!(engine.stats().computed, 90);
    }

    #[test]
    fn compute_cancelled_keeps_valid_prefix() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut engine = FibEngine::new();
        let result = engine.compute(1_000, &cancel, &NoOpObserver::new());
        assert_eq!(result, Err(FibError::Cancelled));
        assert_eq!(engine.cache().highest_index(), 10);

        let mut reference = FibEngine::new();
        for (i, v) in engine.cache().iter() {
            assert_eq!(v, reference.fib(i));
        }
    }

    #[test]
    fn compute_reports_progress_and_completion() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = ChannelObserver::new(tx);
        let cancel = CancellationToken::new();
        let mut engine = FibEngine::new();
        engine.compute(1_010, &cancel, &observer).unwrap();

        let updates: Vec<ProgressUpdate> = rx.try_iter().collect();
        assert!(updates.len() > 2);
        let last = updates.last().unwrap();
        assert!(last.done);
        assert_eq!(last.target, 1_010);
        assert!(updates
            .windows(2)
            .all(|w| w[0].progress <= w[1].progress));
    }

    #[test]
    fn compute_recursive_within_limit() {
        let mut engine = FibEngine::with_strategy(Strategy::recursive());
        let cancel = CancellationToken::new();
        let value = engine.compute(100, &cancel, &NoOpObserver::new()).unwrap();
        assert_eq!(value.to_string(), F100);

        cancel.cancel();
        let result = engine.compute(200, &cancel, &NoOpObserver::new());
        assert_eq!(result, Err(FibError::Cancelled));
        assert_eq!(engine.cache().highest_index(), 100);
    }

    #[test]
    fn compute_recursive_beyond_limit_reports_progress() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = ChannelObserver::new(tx);
        let mut engine = FibEngine::with_strategy(Strategy::Recursive { max_depth: 4 });
        engine
            .compute(500, &CancellationToken::new(), &observer)
            .unwrap();
        assert!(rx.try_iter().count() > 1);
        assert_eq!(engine.stats().computed, 490);
    }

    #[test]
    fn compute_hit_reports_done() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = ChannelObserver::new(tx);
        let mut engine = FibEngine::new();
        engine
            .compute(7, &CancellationToken::new(), &observer)
            .unwrap();
        assert_eq!(engine.stats().hits, 1);
        assert!(rx.try_recv().unwrap().done);
    }

    #[test]
    fn unaddressable_index_fails_fast() {
        let mut engine = FibEngine::new();
        assert_eq!(engine.try_fib(u64::MAX), Err(FibError::IndexTooLarge(u64::MAX)));
        let result = engine.compute(u64::MAX, &CancellationToken::new(), &NoOpObserver::new());
        assert_eq!(result, Err(FibError::IndexTooLarge(u64::MAX)));
        assert_eq!(engine.cache().len(), 11);
        assert_eq!(engine.stats().requests, 0);
    }

    #[test]
    #[should_panic(expected = "too large for this platform")]
    fn fib_panics_on_unaddressable_index() {
        FibEngine::new().fib(u64::MAX);
    }

    #[test]
    fn memory_limit_rejects_before_filling() {
        let mut engine = FibEngine::new().with_memory_limit(Some(1024 * 1024));
        let result = engine.compute(20_000, &CancellationToken::new(), &NoOpObserver::new());
        assert!(matches!(
            result,
            Err(FibError::MemoryLimit { n: 20_000, .. })
        ));
        assert!(matches!(
            engine.try_fib(20_000),
            Err(FibError::MemoryLimit { .. })
        ));
        assert_eq!(engine.cache().len(), 11);
        assert_eq!(engine.stats().computed, 0);

        // Within the limit the same engine still answers.
        assert_eq!(engine.try_fib(100).unwrap().to_string(), F100);
    }

    #[test]
    fn cached_values_ignore_memory_limit() {
        let mut engine = FibEngine::new().with_memory_limit(Some(1));
        assert_eq!(engine.try_fib(10), Ok(&BigUint::from(55u32)));
        assert!(engine.try_fib(11).is_err());
        assert_eq!(engine.memory_limit(), Some(1));
    }

    #[test]
    fn fib_error_display() {
        assert_eq!(FibError::Cancelled.to_string(), "calculation cancelled");
        assert_eq!(
            FibError::IndexTooLarge(9).to_string(),
            "index 9 is too large for this platform"
        );
        let err = FibError::MemoryLimit {
            n: 100_000,
            estimated_mib: 416,
            limit: "256 MiB".into(),
        };
        assert_eq!(
            err.to_string(),
            "caching F(0)..=F(100000) needs about 416 MiB, over the 256 MiB limit"
        );
    }
}
