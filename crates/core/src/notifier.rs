use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use pill_types::{DueReminder, Reminder, ReminderTime};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::store::StoreWatcher;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Reminders whose time of day equals `now`, at minute resolution, in list order.
pub fn due_at(reminders: &[Reminder], now: NaiveTime) -> Vec<DueReminder> {
    let now = ReminderTime::from_naive(now);
    reminders
        .iter()
        .filter(|r| r.time == now)
        .map(DueReminder::from)
        .collect()
}

/// Periodic due-reminder check.
///
/// Each tick reads the latest store snapshot and emits one [`DueReminder`] per
/// matching entry. A minute is evaluated at most once, so a poll period
/// shorter than a minute does not repeat alerts. There is no "already fired
/// today" record: a minute that passes while the notifier is stopped is lost.
pub struct Notifier {
    watcher: StoreWatcher,
    clock: Arc<dyn Clock>,
    period: Duration,
    last_minute: Option<ReminderTime>,
}

impl Notifier {
    pub fn new(watcher: StoreWatcher, clock: Arc<dyn Clock>, period: Duration) -> Self {
        Self {
            watcher,
            clock,
            period: period.max(Duration::from_secs(1)),
            last_minute: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// One synchronous pass over the current snapshot.
    pub fn tick(&mut self, now: NaiveTime) -> Vec<DueReminder> {
        let minute = ReminderTime::from_naive(now);
        if self.last_minute == Some(minute) {
            tracing::trace!("Minute {} already checked", minute);
            return Vec::new();
        }
        self.last_minute = Some(minute);

        let snapshot = self.watcher.snapshot();
        let due = due_at(&snapshot, now);
        tracing::debug!(
            "Checked {} reminders at {}, {} due",
            snapshot.len(),
            minute,
            due.len()
        );
        due
    }

    /// Starts polling on the current runtime. Events go to `sink`.
    ///
    /// The first check runs one period after start. Ticks never overlap.
    pub fn start(mut self, sink: mpsc::UnboundedSender<DueReminder>) -> NotifierHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately on the first tick
            interval.tick().await;

            tracing::debug!("Notifier polling every {:?}", self.period);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        let now = self.clock.now();
                        for due in self.tick(now) {
                            tracing::info!("Reminder due: {} at {}", due.name, due.time);
                            if sink.send(due).is_err() {
                                tracing::debug!("Notification receiver closed, stopping notifier");
                                return;
                            }
                        }
                    }
                }
            }

            tracing::debug!("Notifier stopped");
        });

        NotifierHandle {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Owner of a running notifier. Dropping it cancels the timer.
pub struct NotifierHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl NotifierHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops polling and waits for the task to exit. No tick runs afterwards.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Notifier task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for NotifierHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
