//! Background task supervisor.

use crate::TaskStats;
use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct Inner {
    outstanding: AtomicU64,
    idle: Notify,
    stats: TaskStats,
}

/// Runs fire-and-forget work and tracks it for shutdown.
///
/// Every launched task is counted until it finishes. A task that panics is
/// logged and counted as finished; the panic never reaches the launcher or
/// the rest of the process. [`wait`](Self::wait) resolves once the count
/// drops to zero.
///
/// Each panic produces one `error` event carrying the `task` and `panic`
/// fields. The process panic hook still runs first; replacing it with
/// `std::panic::set_hook` is left to the application.
///
/// Cloning is cheap and every clone shares the same count.
///
/// # Example
///
/// ```rust,no_run
/// use herald_tasks::Supervisor;
///
/// #[tokio::main]
/// async fn main() {
///     let supervisor = Supervisor::new();
///
///     supervisor.launch("send-welcome-email", async {
///         // deliver mail
///     });
///
///     // on shutdown
///     supervisor.wait().await;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Supervisor {
    inner: Arc<Inner>,
}

/// Counts one task as outstanding for as long as it lives.
///
/// Dropping it is the only way the count goes down, so the decrement runs
/// whether the task returns, panics, or is dropped by the runtime.
struct CompletionGuard {
    inner: Arc<Inner>,
}

impl CompletionGuard {
    fn enter(inner: &Arc<Inner>) -> Self {
        inner.outstanding.fetch_add(1, Ordering::AcqRel);
        inner.stats.record_launched();
        Self {
            inner: Arc::clone(inner),
        }
    }

    fn finish(&self, name: &str, outcome: Result<(), Box<dyn Any + Send>>) {
        match outcome {
            Ok(()) => {
                self.inner.stats.record_completed();
                debug!(task = %name, "background task completed");
            }
            Err(payload) => {
                self.inner.stats.record_panicked();
                error!(
                    task = %name,
                    panic = %panic_message(payload.as_ref()),
                    "background task panicked"
                );
            }
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

impl Supervisor {
    /// Creates a supervisor with no outstanding work.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` on the Tokio runtime.
    ///
    /// The outstanding count is raised before this returns, so a later
    /// [`wait`](Self::wait) always covers the task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn launch<F>(&self, name: impl Into<String>, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let guard = CompletionGuard::enter(&self.inner);
        debug!(task = %name, "launching background task");

        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(task).catch_unwind().await;
            guard.finish(&name, outcome);
        });
    }

    /// Runs blocking `work` on the blocking thread pool with the same
    /// isolation as [`launch`](Self::launch).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn launch_blocking<F>(&self, name: impl Into<String>, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let guard = CompletionGuard::enter(&self.inner);
        debug!(task = %name, "launching blocking background task");

        tokio::task::spawn_blocking(move || {
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(work));
            guard.finish(&name, outcome);
        });
    }

    /// Number of tasks launched and not yet finished.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> &TaskStats {
        &self.inner.stats
    }

    /// Resolves once no task is outstanding.
    pub async fn wait(&self) {
        loop {
            let mut notified = pin!(self.inner.idle.notified());
            // Register before checking so a decrement in between is not missed.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }

    /// Waits at most `timeout`; returns true if every task finished.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wait()).await.is_ok()
    }

    /// Waits for outstanding work during shutdown, logging the outcome.
    ///
    /// Returns true if every task finished within `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        info!(
            outstanding = self.outstanding(),
            "waiting for background tasks"
        );

        let drained = self.wait_timeout(timeout).await;
        if drained {
            info!("background tasks finished");
        } else {
            warn!(
                outstanding = self.outstanding(),
                "shutdown timeout reached, background tasks still running"
            );
        }
        drained
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
