//! Periodic reconciliation with the remote.
//!
//! The refresh driver is the only way remote state flows back into the
//! client: on every interval it fetches the full list and posts it for
//! wholesale replacement. A failed fetch changes nothing and is retried on the
//! next interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::Timer;
use crate::event::{EventTx, SyncEvent};
use crate::remote::{RemoteError, TimerRemote};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct RefreshDriver {
    remote: Arc<dyn TimerRemote>,
    interval: Duration,
}

impl RefreshDriver {
    pub fn new(remote: Arc<dyn TimerRemote>, interval: Duration) -> Self {
        Self {
            remote,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Fetch the list once. Failures are logged before being returned.
    pub async fn poll_once(&self) -> Result<Vec<Timer>, RemoteError> {
        let result = self.remote.list().await;
        match &result {
            Ok(timers) => debug!(timers = timers.len(), "Fetched timers from remote"),
            Err(err) => warn!(error = %err, "Failed to refresh timers, keeping local state"),
        }
        result
    }

    /// Poll forever, starting immediately. Returns once nobody listens on
    /// `events` any more.
    pub async fn run(self, events: EventTx) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Timer refresh started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if events.is_closed() {
                break;
            }

            if let Ok(timers) = self.poll_once().await {
                if events.send(SyncEvent::Refreshed(timers)).is_err() {
                    break;
                }
            }
        }

        debug!("Timer refresh stopped");
    }

    pub fn spawn(self, events: EventTx) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    /// One-off fetch outside the schedule, e.g. on user request. Unlike the
    /// scheduled poll, a failure is reported as [`SyncEvent::RefreshFailed`].
    pub fn refresh_now(&self, events: EventTx) -> JoinHandle<()> {
        let driver = self.clone();
        tokio::spawn(async move {
            let event = match driver.poll_once().await {
                Ok(timers) => SyncEvent::Refreshed(timers),
                Err(err) => SyncEvent::RefreshFailed(err.to_string()),
            };
            let _ = events.send(event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerId;
    use crate::event::channel;
    use crate::remote::MemoryRemote;

    fn remote_with_one() -> MemoryRemote {
        MemoryRemote::with_timers(vec![Timer::new(TimerId::from("srv"), "Server", "P")])
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_is_immediate() {
        let remote = remote_with_one();
        let (tx, mut rx) = channel();
        let task = RefreshDriver::new(Arc::new(remote), DEFAULT_REFRESH_INTERVAL).spawn(tx);

        match rx.recv().await {
            Some(SyncEvent::Refreshed(timers)) => assert_eq!(timers.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_polling() {
        let remote = remote_with_one();
        remote.set_fail_reads(true).await;
        let (tx, mut rx) = channel();
        let task =
            RefreshDriver::new(Arc::new(remote.clone()), DEFAULT_REFRESH_INTERVAL).spawn(tx);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(rx.try_recv().is_err(), "failed fetches must not post anything");

        remote.set_fail_reads(false).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(rx.try_recv(), Ok(SyncEvent::Refreshed(_))));
        task.abort();
    }

    #[tokio::test]
    async fn manual_refresh_reports_failures() {
        let remote = remote_with_one();
        remote.set_fail_reads(true).await;
        let (tx, mut rx) = channel();
        let driver = RefreshDriver::new(Arc::new(remote.clone()), DEFAULT_REFRESH_INTERVAL);

        driver.refresh_now(tx.clone()).await.unwrap();
        assert!(matches!(rx.try_recv(), Ok(SyncEvent::RefreshFailed(_))));

        remote.set_fail_reads(false).await;
        driver.refresh_now(tx).await.unwrap();
        assert!(matches!(rx.try_recv(), Ok(SyncEvent::Refreshed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_receiver_is_dropped() {
        let (tx, rx) = channel();
        let task = RefreshDriver::new(Arc::new(remote_with_one()), DEFAULT_REFRESH_INTERVAL)
            .spawn(tx);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(task.is_finished());
    }
}
