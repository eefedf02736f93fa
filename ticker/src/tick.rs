//! Render ticks for running timers.
//!
//! Each running timer gets its own repeating task that asks for a repaint.
//! The driver belongs to whatever displays the timers: tasks are started and
//! aborted as [`TickDriver::reconcile`] sees timers start, stop or disappear,
//! and dropping the driver ends all of them. It only ever reads snapshots.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

use crate::domain::TimerId;
use crate::event::{EventTx, SyncEvent};
use crate::store::Snapshot;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Aborts the tick task when dropped.
struct TickGuard(JoinHandle<()>);

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct TickDriver {
    interval: Duration,
    events: EventTx,
    tickers: HashMap<TimerId, TickGuard>,
}

impl TickDriver {
    pub fn new(interval: Duration, events: EventTx) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            events,
            tickers: HashMap::new(),
        }
    }

    /// Tick exactly the timers that are running in `snapshot`.
    pub fn reconcile(&mut self, snapshot: &Snapshot) {
        self.tickers.retain(|id, _| {
            let keep = snapshot.get(id).is_some_and(|t| t.is_running());
            if !keep {
                trace!(timer_id = %id, "Stopping render ticks");
            }
            keep
        });

        for timer in snapshot.running() {
            if !self.tickers.contains_key(&timer.id) {
                trace!(timer_id = %timer.id, "Starting render ticks");
                let guard = self.spawn_ticker(timer.id.clone());
                self.tickers.insert(timer.id.clone(), guard);
            }
        }
    }

    pub fn is_ticking(&self, id: &TimerId) -> bool {
        self.tickers.contains_key(id)
    }

    pub fn active(&self) -> usize {
        self.tickers.len()
    }

    fn spawn_ticker(&self, id: TimerId) -> TickGuard {
        let events = self.events.clone();
        let period = self.interval;

        TickGuard(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if events.send(SyncEvent::Tick(id.clone())).is_err() {
                    break;
                }
            }
        }))
    }
}
