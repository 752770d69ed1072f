//! Observer trait for engine progress.

use crate::progress::ProgressUpdate;

/// Receives progress updates while the engine extends its cache.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);
}
