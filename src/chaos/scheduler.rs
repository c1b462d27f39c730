//! Chaos scheduler.
//!
//! # States
//! ```text
//! Idle ──start()──▶ Scheduled ──stop()──▶ Idle
//!                   (auto_trigger every interval)
//! ```
//!
//! `start()` while Scheduled and `stop()` while Idle are no-ops.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::chaos::trigger::{TriggerController, TriggerSource};
use crate::observability::metrics;

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Scheduled,
}

/// The running job.
struct ScheduledJob {
    handle: JoinHandle<()>,
    stop_tx: watch::Sender<bool>,
}

/// Owns at most one recurring failure job.
pub struct ChaosScheduler {
    triggers: TriggerController,
    interval: Duration,
    job: Mutex<Option<ScheduledJob>>,
}

impl ChaosScheduler {
    pub fn new(triggers: TriggerController, interval: Duration) -> Self {
        Self {
            triggers,
            interval,
            job: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        match self.lock_job().as_ref() {
            Some(job) if !job.handle.is_finished() => SchedulerState::Scheduled,
            _ => SchedulerState::Idle,
        }
    }

    /// Schedule the job. Returns `false` if one is already running.
    ///
    /// The first trigger fires one full interval after this call.
    pub fn start(&self) -> bool {
        let mut job = self.lock_job();
        if let Some(existing) = job.as_ref() {
            if !existing.handle.is_finished() {
                tracing::debug!("Chaos job already scheduled, start ignored");
                return false;
            }
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_job(self.triggers.clone(), self.interval, stop_rx));
        *job = Some(ScheduledJob { handle, stop_tx });

        metrics::set_scheduler_active(true);
        tracing::info!(interval_secs = self.interval.as_secs_f64(), "Chaos job scheduled");
        true
    }

    /// Cancel the job. Returns `false` if nothing was scheduled.
    ///
    /// A trigger already in progress completes; no new one starts.
    pub fn stop(&self) -> bool {
        let Some(job) = self.lock_job().take() else {
            tracing::debug!("No chaos job scheduled, stop ignored");
            return false;
        };

        let _ = job.stop_tx.send(true);
        metrics::set_scheduler_active(false);
        tracing::info!("Chaos job removed");
        true
    }

    fn lock_job(&self) -> MutexGuard<'_, Option<ScheduledJob>> {
        self.job.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run_job(triggers: TriggerController, period: Duration, mut stop_rx: watch::Receiver<bool>) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Stop wins over a tick that is due at the same time.
            biased;

            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = triggers.auto_trigger(TriggerSource::Scheduler).await {
                    tracing::warn!(error = %e, "Scheduled trigger failed, job keeps running");
                }
            }
        }
    }

    tracing::debug!("Chaos job exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StateStore, StoreError};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn scheduler(dir: &TempDir, interval: Duration) -> ChaosScheduler {
        let path = dir.path().join("important_file");
        std::fs::write(&path, "healthy=true\nmanual_config=valid").unwrap();
        let store = Arc::new(StateStore::open(path).await.unwrap());
        ChaosScheduler::new(TriggerController::new(store), interval)
    }

    async fn healthy(scheduler: &ChaosScheduler) -> bool {
        scheduler.triggers.store().snapshot().await.unwrap().healthy
    }

    #[tokio::test]
    async fn test_start_flips_healthy_after_interval() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_millis(100)).await;

        assert!(scheduler.start());
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);
        assert!(healthy(&scheduler).await, "no trigger before the first interval");

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!healthy(&scheduler).await);
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_stop_halts_flips() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_millis(100)).await;

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(scheduler.stop());
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        // Let any in-flight tick finish, then restore the flag by hand.
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.triggers.store().reset(true).await.unwrap();

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(healthy(&scheduler).await);
    }

    #[tokio::test]
    async fn test_stop_beats_due_tick() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_millis(50)).await;

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Block the runtime so the tick and the stop signal are both ready
        // when the job is next polled.
        std::thread::sleep(Duration::from_millis(150));
        assert!(scheduler.stop());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(healthy(&scheduler).await);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn test_duplicate_start_is_noop() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_secs(60)).await;

        assert!(scheduler.start());
        assert!(!scheduler.start());
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);

        assert!(scheduler.stop());
        assert!(scheduler.start(), "can be scheduled again after stop");
        scheduler.stop();
    }

    #[tokio::test]
    async fn test_stop_while_idle_is_noop() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_secs(60)).await;

        assert!(!scheduler.stop());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn test_job_survives_store_fault() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir, Duration::from_millis(50)).await;
        let store = scheduler.triggers.store().clone();

        std::fs::remove_file(store.path()).unwrap();
        let _ = store.reload().await;
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);
        assert!(matches!(store.snapshot().await, Err(StoreError::MissingFile(_))));

        std::fs::write(store.path(), "healthy=true\nmanual_config=valid").unwrap();
        store.reload().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!store.snapshot().await.unwrap().healthy);
        scheduler.stop();
    }
}
