//! Loading spinner shown while a computation runs on a worker thread.

use std::time::Duration;

use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressStyle};

use fibmemo_core::progress::ProgressUpdate;

use crate::output::format_number;

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner fed by engine progress updates.
pub struct LoadingSpinner {
    bar: ProgressBar,
}

impl LoadingSpinner {
    /// Create a spinner for F(n). A disabled spinner draws nothing.
    #[must_use]
    pub fn new(n: u64, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style =
            ProgressStyle::with_template("{spinner:.cyan} Calculating F({prefix}) {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_prefix(format_number(n));
        if enabled {
            bar.enable_steady_tick(TICK_INTERVAL);
        }
        Self { bar }
    }

    /// Reflect one progress update.
    pub fn update(&self, update: &ProgressUpdate) {
        if update.done {
            self.bar.set_message("done");
        } else {
            self.bar
                .set_message(format!("{:.0}%", update.progress * 100.0));
        }
    }

    /// Consume updates until every sender is dropped, then clear the spinner.
    ///
    /// Returns the number of updates received.
    pub fn follow(self, updates: &Receiver<ProgressUpdate>) -> usize {
        let mut received = 0;
        for update in updates {
            self.update(&update);
            received += 1;
        }
        self.bar.finish_and_clear();
        received
    }

    /// Current spinner message.
    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }
}
