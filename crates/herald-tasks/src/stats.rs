//! Supervisor counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime counters for a [`Supervisor`](crate::Supervisor).
#[derive(Debug, Default)]
pub struct TaskStats {
    launched: AtomicU64,
    completed: AtomicU64,
    panicked: AtomicU64,
}

impl TaskStats {
    /// Create new empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_launched(&self) {
        self.launched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_panicked(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Tasks handed to the supervisor.
    pub fn launched(&self) -> u64 {
        self.launched.load(Ordering::Relaxed)
    }

    /// Tasks that returned normally.
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Tasks that panicked.
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }
}
