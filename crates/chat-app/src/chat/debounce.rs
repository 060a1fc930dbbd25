use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Trailing-edge debounce with cancellation-on-supersession.
///
/// Owns a single optional scheduled-task slot: `schedule` cancels whatever
/// is in the slot before storing the new task, so only the most recent task
/// inside a rolling window ever runs. Superseded tasks are dropped, never
/// queued or retried.
///
/// Each slot carries a claim flag that the timer takes when it fires and
/// `cancel` takes when it cancels; the swap decides the race, so a task
/// whose timer already fired can never be reported as cancelled.
pub struct Debouncer {
    delay: Duration,
    scheduled: Option<ScheduledTask>,
}

struct ScheduledTask {
    handle: JoinHandle<()>,
    armed: Arc<AtomicBool>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer for `task`, cancelling any previously scheduled task.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        let armed = Arc::new(AtomicBool::new(true));
        let claim = Arc::clone(&armed);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if claim.swap(false, Ordering::AcqRel) {
                task.await;
            }
        });
        self.scheduled = Some(ScheduledTask { handle, armed });
    }

    /// Cancels the scheduled task if its timer has not fired yet. Returns
    /// whether a live timer was actually cancelled; once the timer has
    /// claimed the slot, its task runs to completion and this reports
    /// `false`.
    pub fn cancel(&mut self) -> bool {
        match self.scheduled.take() {
            Some(ScheduledTask { handle, armed }) => {
                let cancelled = armed.swap(false, Ordering::AcqRel);
                if cancelled {
                    handle.abort();
                }
                cancelled
            }
            None => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_task_after_the_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(counting_task(&counter));

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_inside_the_window_drops_the_older_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(counting_task(&counter));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(counting_task(&counter));

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_empties_the_slot() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(counting_task(&counter));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_the_timer_fires_reports_nothing_cancelled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(counting_task(&counter));
        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // The timer already claimed the slot; nothing is left to cancel.
        assert!(!debouncer.cancel());
    }
}
