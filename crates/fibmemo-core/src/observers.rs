//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::observer::ProgressObserver;
use crate::progress::ProgressUpdate;

/// Observer that sends updates through a channel (non-blocking).
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
    last_reported: AtomicU64,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self {
            sender,
            last_reported: AtomicU64::new(0),
        }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let last = f64::from_bits(self.last_reported.load(Ordering::Relaxed));
        if update.done || (update.progress - last) >= PROGRESS_REPORT_THRESHOLD {
            // A full channel means the receiver is behind; drop the update.
            let _ = self.sender.try_send(update.clone());
            self.last_reported
                .store(update.progress.to_bits(), Ordering::Relaxed);
        }
    }
}

/// Null object pattern: does nothing with progress updates.
#[derive(Debug, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer that discards all progress updates.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}
