//! Thread-safe handle to a single engine.

use std::sync::Arc;

use num_bigint::BigUint;
use parking_lot::Mutex;

use crate::engine::{EngineStats, FibEngine, FibError};
use crate::observer::ProgressObserver;
use crate::progress::CancellationToken;
use crate::strategy::Strategy;

/// Cloneable handle that serializes access to one `FibEngine`.
///
/// Every clone shares the same cache, so a value computed through one
/// handle is a cache hit for all others.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    inner: Arc<Mutex<FibEngine>>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: FibEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Return F(n). Blocks while another caller holds the engine.
    pub fn fib(&self, n: u64) -> BigUint {
        self.inner.lock().fib(n).clone()
    }

    /// Cancellable, observable variant of [`SharedEngine::fib`].
    pub fn compute(
        &self,
        n: u64,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
    ) -> Result<BigUint, FibError> {
        self.inner.lock().compute(n, cancel, observer).cloned()
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.inner.lock().stats()
    }

    /// Number of cached entries, seed table included.
    #[must_use]
    pub fn cached_len(&self) -> u64 {
        self.inner.lock().cache().len()
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.inner.lock().strategy()
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(FibEngine::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::NoOpObserver;

    #[test]
    fn clones_share_the_cache() {
        let engine = SharedEngine::default();
        let other = engine.clone();
        engine.fib(200);
        assert_eq!(other.cached_len(), 201);

        other.fib(200);
        assert_eq!(engine.stats().hits, 1);
    }

    #[test]
    fn concurrent_callers_agree() {
        let engine = SharedEngine::new(FibEngine::with_strategy(Strategy::recursive()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.fib(400))
            })
            .collect();
        let results: Vec<BigUint> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));

        let stats = engine.stats();
        assert_eq!(stats.computed, 390);
        assert_eq!(stats.hits, 3);
    }

    #[test]
    fn compute_through_handle() {
        let engine = SharedEngine::default();
        let value = engine
            .compute(100, &CancellationToken::new(), &NoOpObserver::new())
            .unwrap();
        assert_eq!(value.to_string(), "354224848179261915075");
        assert_eq!(engine.strategy(), Strategy::Iterative);
    }
}
