//! Repeating advert timer.
//!
//! A [`Scheduler`] owns at most one running [`RepeatingTask`]. Starting or
//! restarting it cancels the previous task first, so a reload never leaves
//! two timers firing.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Action run on every firing.
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Errors raised when starting the timer.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Invalid timer period: {0:?}")]
    InvalidPeriod(Duration),

    #[error("No tokio runtime available to drive the timer")]
    NoRuntime,
}

/// Handle to one spawned timer loop.
pub struct RepeatingTask {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
    period: Duration,
}

impl RepeatingTask {
    /// Spawn a timer that runs `tick` every `period`.
    ///
    /// The first firing happens one full period after spawning. Missed
    /// firings are skipped rather than replayed. A panicking tick is logged
    /// and the timer keeps going.
    pub fn spawn(period: Duration, tick: TickFn) -> Result<Self, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::InvalidPeriod(period));
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            debug!(?period, "Advert timer started");

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!("Advert timer cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if catch_unwind(AssertUnwindSafe(|| tick())).is_err() {
                            error!("Advert tick panicked; timer continues");
                        }
                    }
                }
            }
        });

        Ok(Self {
            cancel_token,
            handle,
            period,
        })
    }

    /// Stop future firings. A firing already running completes.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether the timer loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Owner of the advert timer.
pub struct Scheduler {
    tick: TickFn,
    current: Mutex<Option<RepeatingTask>>,
}

impl Scheduler {
    pub fn new(tick: TickFn) -> Self {
        Self {
            tick,
            current: Mutex::new(None),
        }
    }

    /// Start firing every `period`, replacing any running timer.
    ///
    /// On error the previous timer is left untouched.
    pub fn start(&self, period: Duration) -> Result<(), SchedulerError> {
        let task = RepeatingTask::spawn(period, Arc::clone(&self.tick))?;
        if let Some(previous) = self.current.lock().replace(task) {
            previous.cancel();
        }
        Ok(())
    }

    /// Cancel and start again with a new period.
    pub fn restart(&self, period: Duration) -> Result<(), SchedulerError> {
        self.start(period)
    }

    /// Stop the timer. No-op when nothing is running.
    pub fn cancel(&self) {
        if let Some(task) = self.current.lock().take() {
            task.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_cancelled())
    }

    /// Period of the running timer.
    pub fn period(&self) -> Option<Duration> {
        self.current.lock().as_ref().map(RepeatingTask::period)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicUsize>, TickFn) {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);
        let tick: TickFn = Arc::new(move || {
            tick_count.fetch_add(1, Ordering::SeqCst);
        });
        (count, tick)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fire_after_one_period() {
        let (count, tick) = counter();
        let scheduler = Scheduler::new(tick);
        scheduler.start(Duration::from_secs(15)).unwrap();

        sleep(Duration::from_millis(14_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_firing() {
        let (count, tick) = counter();
        let scheduler = Scheduler::new(tick);
        scheduler.start(Duration::from_secs(1)).unwrap();

        sleep(Duration::from_millis(2_500)).await;
        scheduler.cancel();
        assert!(!scheduler.is_running());

        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_timer() {
        let (count, tick) = counter();
        let scheduler = Scheduler::new(tick);
        scheduler.start(Duration::from_secs(10)).unwrap();

        sleep(Duration::from_secs(5)).await;
        scheduler.restart(Duration::from_secs(3)).unwrap();
        assert_eq!(scheduler.period(), Some(Duration::from_secs(3)));

        // Old timer would have fired at 10s; the new one fires at 8s and 11s.
        sleep(Duration::from_millis(6_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_rejected() {
        let (count, tick) = counter();
        let scheduler = Scheduler::new(tick);
        scheduler.start(Duration::from_secs(2)).unwrap();

        assert!(matches!(
            scheduler.restart(Duration::ZERO),
            Err(SchedulerError::InvalidPeriod(_))
        ));
        assert!(scheduler.is_running());

        sleep(Duration::from_millis(2_100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_tick_keeps_timer_alive() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);
        let tick: TickFn = Arc::new(move || {
            let n = tick_count.fetch_add(1, Ordering::SeqCst);
            assert!(n != 0, "first tick fails");
        });
        let scheduler = Scheduler::new(tick);
        scheduler.start(Duration::from_secs(1)).unwrap();

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_start_without_runtime_fails() {
        let (_count, tick) = counter();
        let scheduler = Scheduler::new(tick);
        assert!(matches!(
            scheduler.start(Duration::from_secs(1)),
            Err(SchedulerError::NoRuntime)
        ));
    }
}
