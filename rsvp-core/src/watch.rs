//! Keeping a displayed view fresh by re-reading the store on a timer.
//!
//! There is no change notification from the store: a view loads once when
//! it is opened, then re-loads every period and replaces its snapshot
//! wholesale. Whatever was written last is what the next tick shows.
//!
//! A [`PollHandle`] owns its timer task. Dropping the handle (or calling
//! [`PollHandle::stop`]) aborts the task, so a closed view never keeps
//! polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::event::Event;
use crate::store::Store;

pub struct Poller {
    period: Duration,
}

impl Poller {
    pub fn new(period: Duration) -> Self {
        Poller { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Load once right away, then again every period. Later loads run on
    /// the blocking pool since they read from disk.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T, F>(&self, load: F) -> PollHandle<T>
    where
        T: PartialEq + Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let load = Arc::new(load);
        let (tx, rx) = watch::channel((*load)());
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Some(()) = refresh_rx.recv() => ticker.reset(),
                    _ = tx.closed() => break,
                }

                let load = Arc::clone(&load);
                let snapshot = match tokio::task::spawn_blocking(move || (*load)()).await {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        tracing::warn!(error = %e, "Poll load failed");
                        continue;
                    }
                };

                tx.send_if_modified(|current| {
                    if *current == snapshot {
                        return false;
                    }
                    *current = snapshot;
                    true
                });
            }

            tracing::debug!("Poller stopped");
        });

        PollHandle {
            rx,
            refresh: refresh_tx,
            task,
        }
    }
}

/// A live view over some store data. Stops polling when dropped.
pub struct PollHandle<T> {
    rx: watch::Receiver<T>,
    refresh: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl<T: Clone> PollHandle<T> {
    /// Latest snapshot.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait until a poll produces a snapshot different from the last one
    /// seen through this handle. `None` once the poller has stopped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

impl<T> PollHandle<T> {
    /// Re-load now instead of waiting for the next tick. The regular
    /// schedule restarts from here.
    pub fn refresh(&self) {
        let _ = self.refresh.try_send(());
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {}
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Event details view: one event, `None` if it doesn't exist (yet).
pub fn watch_event(store: Store, event_id: &str, period: Duration) -> PollHandle<Option<Event>> {
    let event_id = event_id.to_string();
    Poller::new(period).spawn(move || store.event(&event_id))
}

/// Host dashboard view: every event the host created, in creation order.
pub fn watch_dashboard(store: Store, host_id: &str, period: Duration) -> PollHandle<Vec<Event>> {
    let host_id = host_id.to_string();
    Poller::new(period).spawn(move || store.events_by_host(&host_id))
}
