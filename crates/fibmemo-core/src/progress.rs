//! Progress tracking types and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engine::FibError;

/// Progress update sent from the engine to observers while the cache grows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Index most recently written to the cache.
    pub index: u64,
    /// Index being requested.
    pub target: u64,
    /// Fraction of the missing range filled so far, in [0.0, 1.0].
    pub progress: f64,
    /// Whether this is the final update.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    pub fn new(index: u64, target: u64, progress: f64) -> Self {
        Self {
            index,
            target,
            progress,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(target: u64) -> Self {
        Self {
            index: target,
            target,
            progress: 1.0,
            done: true,
        }
    }
}

/// Cooperative cancellation token.
///
/// # Example
/// ```
/// use fibmemo_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), FibError> {
        if self.is_cancelled() {
            Err(FibError::Cancelled)
        } else {
            Ok(())
        }
    }
}
