//! Local-then-remote mutation protocol.
//!
//! Each user action is applied to the [`TimerStore`] synchronously and then
//! forwarded to the remote as a detached task. The remote's answer is only
//! logged and reported as a [`RemoteOutcome`]; it never feeds back into the
//! store. Divergence between the two lasts until the next full refresh.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{Timer, TimerDraft, TimerId, TimerPatch};
use crate::event::{EventTx, Operation, RemoteOutcome, SyncEvent};
use crate::remote::{RemoteError, TimerRemote};
use crate::store::{Mutation, Outcome, Snapshot, TimerStore};

/// A remote write waiting to be issued.
#[derive(Debug, Clone)]
enum RemoteCall {
    Create(Timer),
    Update(TimerPatch),
    Delete(TimerId),
    Start { id: TimerId, start: OffsetDateTime },
    Stop { id: TimerId, stop: OffsetDateTime },
}

impl RemoteCall {
    fn operation(&self) -> Operation {
        match self {
            RemoteCall::Create(_) => Operation::Create,
            RemoteCall::Update(_) => Operation::Update,
            RemoteCall::Delete(_) => Operation::Delete,
            RemoteCall::Start { .. } => Operation::Start,
            RemoteCall::Stop { .. } => Operation::Stop,
        }
    }

    fn timer_id(&self) -> &TimerId {
        match self {
            RemoteCall::Create(timer) => &timer.id,
            RemoteCall::Update(patch) => &patch.id,
            RemoteCall::Delete(id) | RemoteCall::Start { id, .. } | RemoteCall::Stop { id, .. } => {
                id
            }
        }
    }

    async fn execute(&self, remote: &dyn TimerRemote) -> Result<(), RemoteError> {
        match self {
            RemoteCall::Create(timer) => remote.create(timer).await,
            RemoteCall::Update(patch) => remote.update(patch).await,
            RemoteCall::Delete(id) => remote.delete(id).await,
            RemoteCall::Start { id, start } => remote.start(id, *start).await,
            RemoteCall::Stop { id, stop } => remote.stop(id, *stop).await,
        }
    }
}

/// Owner of the timer list and the only path that mutates it.
///
/// Mutating methods spawn onto the current Tokio runtime and must be called
/// from within one.
pub struct Coordinator {
    store: TimerStore,
    remote: Arc<dyn TimerRemote>,
    clock: Arc<dyn Clock>,
    events: Option<EventTx>,
}

impl Coordinator {
    pub fn new(remote: Arc<dyn TimerRemote>) -> Self {
        Self {
            store: TimerStore::new(),
            remote,
            clock: Arc::new(SystemClock),
            events: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Report every remote write outcome on `events`.
    pub fn with_events(mut self, events: EventTx) -> Self {
        self.events = Some(events);
        self
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn create(&mut self, draft: TimerDraft) -> Snapshot {
        match self.store.create(draft) {
            Ok(created) => {
                debug!(timer_id = %created.timer.id, "Created timer locally");
                self.dispatch(RemoteCall::Create(created.timer));
                created.snapshot
            }
            Err(err) => {
                warn!(error = %err, "Ignoring create");
                self.snapshot()
            }
        }
    }

    pub fn update(&mut self, patch: TimerPatch) -> Snapshot {
        let mutation = self.store.update(&patch);
        self.apply(mutation, RemoteCall::Update(patch))
    }

    pub fn delete(&mut self, id: &TimerId) -> Snapshot {
        let mutation = self.store.delete(id);
        self.apply(mutation, RemoteCall::Delete(id.clone()))
    }

    pub fn start(&mut self, id: &TimerId) -> Snapshot {
        let now = self.clock.now();
        let mutation = self.store.start(id, now);
        let call = RemoteCall::Start {
            id: id.clone(),
            start: now,
        };
        self.apply(mutation, call)
    }

    pub fn stop(&mut self, id: &TimerId) -> Snapshot {
        let now = self.clock.now();
        let mutation = self.store.stop(id, now);
        let call = RemoteCall::Stop {
            id: id.clone(),
            stop: now,
        };
        self.apply(mutation, call)
    }

    /// Start a stopped timer or stop a running one. Unknown ids do nothing.
    pub fn toggle(&mut self, id: &TimerId) -> Snapshot {
        match self.store.snapshot().get(id).map(Timer::is_running) {
            Some(true) => self.stop(id),
            Some(false) => self.start(id),
            None => self.snapshot(),
        }
    }

    /// Adopt the server's list wholesale. Local-only changes are dropped.
    pub fn refresh(&mut self, timers: Vec<Timer>) -> Snapshot {
        let mutation = self.store.replace_all(timers);
        debug!(timers = mutation.snapshot.len(), "Replaced timers from remote");
        mutation.snapshot
    }

    /// The remote still gets the call when nothing changed locally; the
    /// server decides and the next refresh reconciles.
    fn apply(&self, mutation: Mutation, call: RemoteCall) -> Snapshot {
        if mutation.outcome == Outcome::Unchanged {
            debug!(
                operation = %call.operation(),
                timer_id = %call.timer_id(),
                "Local state unchanged, forwarding to remote anyway"
            );
        }
        self.dispatch(call);
        mutation.snapshot
    }

    fn dispatch(&self, call: RemoteCall) {
        let remote = Arc::clone(&self.remote);
        let events = self.events.clone();

        tokio::spawn(async move {
            let operation = call.operation();
            let result = call.execute(&*remote).await;

            match &result {
                Ok(()) => debug!(%operation, timer_id = %call.timer_id(), "Remote write succeeded"),
                Err(err) => warn!(
                    %operation,
                    timer_id = %call.timer_id(),
                    error = %err,
                    "Remote write failed, keeping local state until next refresh"
                ),
            }

            if let Some(events) = events {
                let _ = events.send(SyncEvent::Remote(RemoteOutcome {
                    operation,
                    timer_id: call.timer_id().clone(),
                    error: result.err().map(|err| err.to_string()),
                }));
            }
        });
    }
}
