use std::fmt;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::{Timer, TimerId};

/// Everything the background tasks report back to the owner of the store.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A fresh authoritative list from the remote.
    Refreshed(Vec<Timer>),
    /// A refresh requested outside the schedule failed.
    RefreshFailed(String),
    /// Time to repaint a running timer.
    Tick(TimerId),
    /// A fire-and-forget remote write resolved.
    Remote(RemoteOutcome),
}

pub type EventTx = UnboundedSender<SyncEvent>;
pub type EventRx = UnboundedReceiver<SyncEvent>;

pub fn channel() -> (EventTx, EventRx) {
    mpsc::unbounded_channel()
}

/// Which remote write an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Start,
    Stop,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Start => write!(f, "start"),
            Operation::Stop => write!(f, "stop"),
        }
    }
}

/// How a remote write ended. Diagnostic only: it never changes local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOutcome {
    pub operation: Operation,
    pub timer_id: TimerId,
    pub error: Option<String>,
}

impl RemoteOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for RemoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "Synced {} of {}", self.operation, self.timer_id),
            Some(error) => write!(
                f,
                "Failed to {} {}: {}",
                self.operation, self.timer_id, error
            ),
        }
    }
}
