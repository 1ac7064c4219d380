//! # Periodic tasks
//!
//! A [`PeriodicTask`] re-runs the same job on a fixed period until the screen
//! that owns it goes away. It replaces free-running interval timers: the task
//! is tied to a handle, and once [`PeriodicTask::stop`] returns no further run
//! can start, so a torn-down screen never receives a late update.
//!
//! Runs are sequential. The first run starts immediately, and a tick that
//! arrives while a run is still in flight is delayed rather than stacked, so
//! two fetches of the same resource never overlap and the last one to finish
//! is also the last one started.
//!
//! Pair it with a [`tokio::sync::watch`] channel to publish results; readers
//! always see the latest value.

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, trace};

/// Handle to a running periodic job.
///
/// Dropping the handle aborts the job; prefer [`stop`](Self::stop) to wait for
/// a clean exit.
pub struct PeriodicTask {
    name: &'static str,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Spawns `job` on the current Tokio runtime, running it now and then
    /// every `period`.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut stop_requested) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(task = name, period_ms = period.as_millis() as u64, "Poller started");

            let mut runs: u64 = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_requested => break,
                    _ = ticker.tick() => {}
                }

                runs += 1;
                trace!(task = name, runs, "Tick");
                // An in-flight run is abandoned on stop.
                tokio::select! {
                    biased;
                    _ = &mut stop_requested => break,
                    _ = job() => {}
                }
            }

            info!(task = name, runs, "Poller stopped");
        });

        Self {
            name,
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the job and waits for its task to exit.
    ///
    /// Returns an error only if the job panicked.
    pub async fn stop(mut self) -> Result<(), String> {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already be gone; nothing to signal then.
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!(task = self.name, "Poller task failed: {:?}", e);
                return Err(format!("Poller task {} failed: {:?}", self.name, e));
            }
        }
        Ok(())
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_task(period: Duration) -> (PeriodicTask, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let task = PeriodicTask::spawn("test", period, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (task, runs)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_every_period() {
        let (task, runs) = counting_task(Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);

        task.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_runs_after_stop() {
        let (task, runs) = counting_task(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        task.stop().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_abandons_slow_run() {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let (s, f) = (started.clone(), finished.clone());
        let task = PeriodicTask::spawn("slow", Duration::from_secs(5), move || {
            let (s, f) = (s.clone(), f.clone());
            async move {
                s.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(30)).await;
                f.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        task.stop().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts() {
        let (task, runs) = counting_task(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(1)).await;
        drop(task);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
