//! Console presentation of harvest progress through `tracing`.

use std::sync::atomic::{AtomicU64, Ordering};

use harvester_scraper::ProgressSink;

/// Logs an `info` event each time progress crosses another 10% of the
/// current stage's total. `set_total` starts a new stage.
#[derive(Debug, Default)]
pub(crate) struct TracingProgress {
    stage: AtomicU64,
    total: AtomicU64,
    done: AtomicU64,
    /// Last 10% step that was logged, `0..=10`.
    logged_step: AtomicU64,
}

impl TracingProgress {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for TracingProgress {
    fn set_total(&self, total: u64) {
        let stage = self.stage.fetch_add(1, Ordering::Relaxed) + 1;
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        self.logged_step.store(0, Ordering::Relaxed);
        tracing::debug!(stage, total, "progress stage started");
    }

    fn update(&self, delta: u64) {
        let total = self.total.load(Ordering::Relaxed);
        let done = (self.done.fetch_add(delta, Ordering::Relaxed) + delta).min(total);
        if total == 0 {
            return;
        }

        let step = done * 10 / total;
        let previous = self.logged_step.fetch_max(step, Ordering::Relaxed);
        if step > previous {
            tracing::info!(
                stage = self.stage.load(Ordering::Relaxed),
                done,
                total,
                "{}% complete",
                step * 10
            );
        }
    }
}
