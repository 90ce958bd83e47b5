//! Deferred work bound to a screen's lifetime
//!
//! A [`ScreenScope`] hands out [`DeferredTask`]s that run a closure after a
//! delay. Dropping the scope invalidates every task it spawned: a task that
//! wakes up after that does nothing. Tasks run on the ambient tokio runtime
//! when there is one, otherwise on a sleeping helper thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Liveness flag shared by everything a screen schedules
#[derive(Debug)]
pub struct ScreenScope {
    alive: Arc<AtomicBool>,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Ends the scope early; pending tasks become no-ops
    pub fn invalidate(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Runs `f` after `delay` unless the scope or the task is gone by then
    pub fn defer<F>(&self, delay: Duration, f: F) -> DeferredTask
    where
        F: FnOnce() + Send + 'static,
    {
        let task = DeferredTask::new(self.alive.clone());
        let guard = task.clone();
        let job = move || {
            if guard.should_run() {
                f();
                guard.ran.store(true, Ordering::SeqCst);
            } else {
                log::debug!("deferred task skipped: scope ended or task cancelled");
            }
            guard.finished.store(true, Ordering::SeqCst);
        };

        spawn_after(delay, job);
        task
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.invalidate();
    }
}

/// Handle to work scheduled with [`ScreenScope::defer`]
#[derive(Debug, Clone)]
pub struct DeferredTask {
    scope_alive: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    ran: Arc<AtomicBool>,
}

impl DeferredTask {
    fn new(scope_alive: Arc<AtomicBool>) -> Self {
        Self {
            scope_alive,
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
            ran: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the task has woken up, whether or not it ran its closure
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Check if the closure actually ran
    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }

    /// Cancel the task
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn should_run(&self) -> bool {
        self.scope_alive.load(Ordering::SeqCst) && !self.is_cancelled()
    }
}

#[cfg(feature = "tokio-runtime")]
fn spawn_after<F>(delay: Duration, job: F)
where
    F: FnOnce() + Send + 'static,
{
    match ::tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                ::tokio::time::sleep(delay).await;
                job();
            });
        }
        Err(_) => spawn_thread_after(delay, job),
    }
}

#[cfg(not(feature = "tokio-runtime"))]
fn spawn_after<F>(delay: Duration, job: F)
where
    F: FnOnce() + Send + 'static,
{
    spawn_thread_after(delay, job)
}

fn spawn_thread_after<F>(delay: Duration, job: F)
where
    F: FnOnce() + Send + 'static,
{
    let spawned = std::thread::Builder::new()
        .name("pinmap-deferred".to_string())
        .spawn(move || {
            std::thread::sleep(delay);
            job();
        });

    if let Err(e) = spawned {
        log::error!("failed to spawn deferred task thread: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_deferred_task_runs_after_delay() {
        let scope = ScreenScope::new();
        let (tx, rx) = unbounded();
        let task = scope.defer(Duration::from_millis(500), move || {
            let _ = tx.send("fired");
        });

        ::tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
        assert!(!task.is_finished());

        ::tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.try_recv(), Ok("fired"));
        assert!(task.is_finished());
        assert!(task.has_run());
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_dropped_scope_skips_task() {
        let scope = ScreenScope::new();
        let (tx, rx) = unbounded();
        let task = scope.defer(Duration::from_millis(500), move || {
            let _ = tx.send(());
        });
        drop(scope);

        ::tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(task.is_finished());
        assert!(!task.has_run());
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_is_skipped() {
        let scope = ScreenScope::new();
        let (tx, rx) = unbounded();
        let task = scope.defer(Duration::from_millis(500), move || {
            let _ = tx.send(());
        });
        task.cancel();
        assert!(task.is_cancelled());

        ::tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(scope.is_alive());
    }

    #[test]
    fn test_thread_fallback_without_runtime() {
        let scope = ScreenScope::new();
        let (tx, rx) = unbounded();
        scope.defer(Duration::from_millis(10), move || {
            let _ = tx.send(42);
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(42));
    }
}
