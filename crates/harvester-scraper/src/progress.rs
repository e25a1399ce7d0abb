//! Progress reporting seam between the harvester and whatever presents it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sink for harvest progress.
///
/// The orchestrator calls [`ProgressSink::set_total`] once per stage
/// (products, then sellers) and [`ProgressSink::update`] as records arrive.
/// Calls come from concurrently running tasks, so implementations must be
/// `Sync`; the only ordering guarantee is that each `update` is a positive
/// increment.
pub trait ProgressSink: Send + Sync {
    /// Establishes or resets the denominator for the current stage.
    fn set_total(&self, total: u64);

    /// Advances the numerator by `delta`.
    fn update(&self, delta: u64);
}

/// Discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn set_total(&self, _total: u64) {}

    fn update(&self, _delta: u64) {}
}

/// Lock-free counter that callers can poll from another task.
///
/// `set_total` starts a new stage: the numerator is reset to zero.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    total: AtomicU64,
    done: AtomicU64,
}

impl ProgressCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl ProgressSink for ProgressCounter {
    fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
    }

    fn update(&self, delta: u64) {
        self.done.fetch_add(delta, Ordering::Relaxed);
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for std::sync::Arc<T> {
    fn set_total(&self, total: u64) {
        (**self).set_total(total);
    }

    fn update(&self, delta: u64) {
        (**self).update(delta);
    }
}
