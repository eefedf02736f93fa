use std::sync::Arc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

use super::{RemoteError, TimerRemote};
use crate::domain::{Timer, TimerId, TimerPatch};
use crate::elapsed::span_between;

/// An in-process timer store with the server's semantics.
///
/// Backs the `dev` mode of the terminal client and the HTTP server, and lets
/// tests switch reads or writes into failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    timers: Vec<Timer>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timers(timers: Vec<Timer>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                timers,
                ..MemoryState::default()
            })),
        }
    }

    /// A couple of demo timers, one of them running since `now`.
    pub fn seeded(now: OffsetDateTime) -> Self {
        Self::with_timers(vec![
            Timer::new(TimerId::generate(), "Practice squat", "Gym Chores")
                .with_elapsed(Duration::milliseconds(5_456_099))
                .with_running_since(now),
            Timer::new(TimerId::generate(), "Bake squash", "Kitchen Chores")
                .with_elapsed(Duration::milliseconds(127_998)),
        ])
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        self.state.write().await.fail_reads = fail;
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.write().await.fail_writes = fail;
    }

    /// Current contents, ignoring the failure switches.
    pub async fn timers(&self) -> Vec<Timer> {
        self.state.read().await.timers.clone()
    }

    async fn write_with<T>(
        &self,
        id: &TimerId,
        apply: impl FnOnce(&mut Timer) -> T,
    ) -> Result<T, RemoteError> {
        let mut state = self.state.write().await;
        if state.fail_writes {
            return Err(RemoteError::Unavailable("writes are disabled".to_string()));
        }
        let timer = state
            .timers
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RemoteError::NotFound(id.clone()))?;
        Ok(apply(timer))
    }
}

#[async_trait]
impl TimerRemote for MemoryRemote {
    async fn list(&self) -> Result<Vec<Timer>, RemoteError> {
        let state = self.state.read().await;
        if state.fail_reads {
            return Err(RemoteError::Unavailable("reads are disabled".to_string()));
        }
        Ok(state.timers.clone())
    }

    async fn create(&self, timer: &Timer) -> Result<(), RemoteError> {
        let mut state = self.state.write().await;
        if state.fail_writes {
            return Err(RemoteError::Unavailable("writes are disabled".to_string()));
        }
        if state.timers.iter().any(|t| t.id == timer.id) {
            return Err(RemoteError::Conflict(timer.id.clone()));
        }
        state.timers.push(timer.clone());
        Ok(())
    }

    async fn update(&self, patch: &TimerPatch) -> Result<(), RemoteError> {
        self.write_with(&patch.id, |timer| {
            timer.title = patch.title.clone();
            timer.project = patch.project.clone();
        })
        .await
    }

    async fn delete(&self, id: &TimerId) -> Result<(), RemoteError> {
        let mut state = self.state.write().await;
        if state.fail_writes {
            return Err(RemoteError::Unavailable("writes are disabled".to_string()));
        }
        let before = state.timers.len();
        state.timers.retain(|t| &t.id != id);
        if state.timers.len() == before {
            return Err(RemoteError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn start(&self, id: &TimerId, start: OffsetDateTime) -> Result<(), RemoteError> {
        self.write_with(id, |timer| {
            if timer.running_since.is_none() {
                timer.running_since = Some(start);
            }
        })
        .await
    }

    async fn stop(&self, id: &TimerId, stop: OffsetDateTime) -> Result<(), RemoteError> {
        self.write_with(id, |timer| {
            if let Some(since) = timer.running_since.take() {
                timer.elapsed += span_between(since, stop);
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[tokio::test]
    async fn start_and_stop_accumulate_like_the_client() {
        let remote = MemoryRemote::new();
        let id = TimerId::from("t");
        remote.create(&Timer::new(id.clone(), "T", "P")).await.unwrap();

        let t0 = datetime!(2024-03-01 10:00 UTC);
        remote.start(&id, t0).await.unwrap();
        remote.start(&id, t0 + Duration::hours(1)).await.unwrap();
        remote.stop(&id, t0 + Duration::seconds(90)).await.unwrap();

        let timers = remote.list().await.unwrap();
        assert_eq!(timers[0].elapsed, Duration::seconds(90));
        assert!(!timers[0].is_running());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let remote = MemoryRemote::new();
        let err = remote.delete(&TimerId::from("ghost")).await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let remote = MemoryRemote::new();
        let timer = Timer::new(TimerId::from("dup"), "T", "P");
        remote.create(&timer).await.unwrap();

        let err = remote.create(&timer).await.unwrap_err();
        assert!(matches!(err, RemoteError::Conflict(_)));
    }

    #[tokio::test]
    async fn failure_switches_affect_only_their_side() {
        let remote = MemoryRemote::seeded(datetime!(2024-03-01 10:00 UTC));
        remote.set_fail_writes(true).await;

        assert!(remote.list().await.is_ok());
        let id = remote.timers().await[0].id.clone();
        assert!(remote.delete(&id).await.is_err());

        remote.set_fail_reads(true).await;
        assert!(remote.list().await.is_err());
        assert_eq!(remote.timers().await.len(), 2);
    }
}
