//! The authoritative in-memory timer list.
//!
//! Every mutation builds a new collection and publishes it as a fresh
//! [`Snapshot`]; snapshots handed out earlier are never touched. A mutation
//! that changes nothing hands back the current snapshot itself, so observers
//! can skip work with [`Snapshot::ptr_eq`].

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::{Timer, TimerDraft, TimerId, TimerPatch};
use crate::elapsed::span_between;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A timer with id '{0}' already exists")]
    DuplicateId(TimerId),
}

/// An immutable, ordered view of the timer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<[Timer]>);

impl Snapshot {
    fn from_vec(timers: Vec<Timer>) -> Self {
        Self(timers.into())
    }

    pub fn get(&self, id: &TimerId) -> Option<&Timer> {
        self.0.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TimerId) -> Option<usize> {
        self.0.iter().position(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TimerId) -> bool {
        self.position(id).is_some()
    }

    /// Timers that are currently running, in display order.
    pub fn running(&self) -> impl Iterator<Item = &Timer> {
        self.0.iter().filter(|t| t.is_running())
    }

    /// Whether both snapshots are the very same publication.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl Deref for Snapshot {
    type Target = [Timer];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Whether a mutation changed the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
}

/// Result of a store mutation: the snapshot to render from now on.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub snapshot: Snapshot,
    pub outcome: Outcome,
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct Created {
    pub timer: Timer,
    pub snapshot: Snapshot,
}

#[derive(Debug, Default)]
pub struct TimerStore {
    current: Snapshot,
}

impl TimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Append a new stopped timer with nothing accumulated.
    pub fn create(&mut self, draft: TimerDraft) -> Result<Created, StoreError> {
        let id = draft.id.unwrap_or_else(TimerId::generate);
        if self.current.contains(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        let timer = Timer::new(id, draft.title, draft.project);
        let mut timers = self.current.to_vec();
        timers.push(timer.clone());
        self.current = Snapshot::from_vec(timers);

        Ok(Created {
            timer,
            snapshot: self.snapshot(),
        })
    }

    /// Replace title and project. Elapsed time and running state are kept.
    pub fn update(&mut self, patch: &TimerPatch) -> Mutation {
        self.modify(&patch.id, |timer| {
            if timer.title == patch.title && timer.project == patch.project {
                return false;
            }
            timer.title = patch.title.clone();
            timer.project = patch.project.clone();
            true
        })
    }

    pub fn delete(&mut self, id: &TimerId) -> Mutation {
        if !self.current.contains(id) {
            return self.unchanged(id, "delete");
        }

        let timers = self
            .current
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();
        self.publish(timers)
    }

    /// Mark the timer as running since `now`. Starting a running timer keeps
    /// its original start.
    pub fn start(&mut self, id: &TimerId, now: OffsetDateTime) -> Mutation {
        self.modify(id, |timer| {
            if timer.is_running() {
                return false;
            }
            timer.running_since = Some(now);
            true
        })
    }

    /// Fold the current run into `elapsed` and clear the running marker.
    /// Stopping a stopped timer is a no-op.
    pub fn stop(&mut self, id: &TimerId, now: OffsetDateTime) -> Mutation {
        self.modify(id, |timer| match timer.running_since.take() {
            Some(since) => {
                timer.elapsed += span_between(since, now);
                true
            }
            None => false,
        })
    }

    /// Swap in `timers` wholesale. Nothing from the previous list survives.
    ///
    /// If `timers` repeats an id, the first occurrence wins.
    pub fn replace_all(&mut self, timers: Vec<Timer>) -> Mutation {
        let mut seen = HashSet::with_capacity(timers.len());
        let mut unique = Vec::with_capacity(timers.len());
        for timer in timers {
            if seen.insert(timer.id.clone()) {
                unique.push(timer);
            } else {
                warn!(timer_id = %timer.id, "Dropping duplicate timer from replacement list");
            }
        }
        self.publish(unique)
    }

    fn modify(&mut self, id: &TimerId, apply: impl FnOnce(&mut Timer) -> bool) -> Mutation {
        let Some(index) = self.current.position(id) else {
            return self.unchanged(id, "modify");
        };

        let mut timer = self.current[index].clone();
        if !apply(&mut timer) {
            return Mutation {
                snapshot: self.snapshot(),
                outcome: Outcome::Unchanged,
            };
        }

        let mut timers = self.current.to_vec();
        timers[index] = timer;
        self.publish(timers)
    }

    fn publish(&mut self, timers: Vec<Timer>) -> Mutation {
        self.current = Snapshot::from_vec(timers);
        Mutation {
            snapshot: self.snapshot(),
            outcome: Outcome::Applied,
        }
    }

    fn unchanged(&self, id: &TimerId, operation: &str) -> Mutation {
        debug!(timer_id = %id, operation, "No timer with this id, ignoring");
        Mutation {
            snapshot: self.snapshot(),
            outcome: Outcome::Unchanged,
        }
    }
}
