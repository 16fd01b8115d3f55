use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Counts outstanding crawl tasks so the run can tell when it is finished.
///
/// Fork/join discipline: `add` is called before a task is spawned and the
/// returned [`TaskGuard`] moves into the task, so the count covers every
/// spawned task from before its first poll until its guard drops,
/// whichever way the task exits. `wait` resolves once the count reaches
/// zero and is meant for the single run-level caller.
#[derive(Clone)]
pub struct TaskCounter {
    inner: Arc<Inner>,
}

struct Inner {
    outstanding: AtomicUsize,
    idle: Notify,
}

impl TaskCounter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                outstanding: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        }
    }

    /// Registers one task, returning the guard that un-registers it on drop.
    pub fn add(&self) -> TaskGuard {
        self.inner.outstanding.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of tasks currently registered.
    pub fn count(&self) -> usize {
        self.inner.outstanding.load(Ordering::SeqCst)
    }

    /// Resolves once every registered task has dropped its guard.
    ///
    /// A guard dropped while no one is waiting leaves a stored wakeup
    /// behind, so the count cannot hit zero unobserved between the loop
    /// check and the await.
    pub async fn wait(&self) {
        while self.inner.outstanding.load(Ordering::SeqCst) != 0 {
            self.inner.idle.notified().await;
        }
    }
}

impl Default for TaskCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Live registration of one task; dropping it is the task's completion signal.
pub struct TaskGuard {
    inner: Arc<Inner>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        let previous = self.inner.outstanding.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "task counter underflow");
        if previous == 1 {
            self.inner.idle.notify_one();
        }
    }
}
