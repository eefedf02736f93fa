//! The remote timer store the client synchronizes with.
//!
//! The store is an opaque CRUD + start/stop API. [`HttpRemote`] talks to it
//! over HTTP; [`MemoryRemote`] keeps the same semantics in-process.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{Timer, TimerId, TimerPatch};

pub mod dto;
mod http;
mod memory;

pub use http::HttpRemote;
pub use memory::MemoryRemote;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to call {call}: {source}")]
    Request {
        call: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{call} returned HTTP {status}")]
    Status {
        call: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse {call} response: {source}")]
    Decode {
        call: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("No timer with id '{0}'")]
    NotFound(TimerId),

    #[error("A timer with id '{0}' already exists")]
    Conflict(TimerId),

    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    /// The HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            RemoteError::NotFound(_) => Some(reqwest::StatusCode::NOT_FOUND),
            RemoteError::Conflict(_) => Some(reqwest::StatusCode::CONFLICT),
            _ => None,
        }
    }
}

/// The remote operations the client depends on.
///
/// Every write succeeds or fails as a whole; callers never inspect a payload
/// beyond success.
#[async_trait]
pub trait TimerRemote: Send + Sync {
    /// The authoritative timer list.
    async fn list(&self) -> Result<Vec<Timer>, RemoteError>;

    /// Record a new timer, id included.
    async fn create(&self, timer: &Timer) -> Result<(), RemoteError>;

    async fn update(&self, patch: &TimerPatch) -> Result<(), RemoteError>;

    async fn delete(&self, id: &TimerId) -> Result<(), RemoteError>;

    async fn start(&self, id: &TimerId, start: OffsetDateTime) -> Result<(), RemoteError>;

    async fn stop(&self, id: &TimerId, stop: OffsetDateTime) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_remote_object_safe(_: &dyn TimerRemote) {}

    #[test]
    fn not_found_maps_to_404() {
        let err = RemoteError::NotFound(TimerId::from("x"));
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "No timer with id 'x'");
    }
}
