//! Optimistic client-side timer synchronization.
//!
//! User actions mutate a local [`TimerStore`] immediately through the
//! [`Coordinator`], which forwards each change to a [`TimerRemote`] without
//! waiting for it. A [`RefreshDriver`] periodically replaces the local list
//! with the remote's, and a [`TickDriver`] asks for repaints while timers run.
//! Displayed time is always derived from `elapsed` and `running_since` at the
//! moment of rendering (see [`elapsed`]).

mod clock;
mod coordinator;
pub mod domain;
pub mod elapsed;
mod event;
pub mod refresh;
pub mod remote;
pub mod serde_millis;
pub mod store;
pub mod tick;

pub use clock::*;
pub use coordinator::*;
pub use domain::*;
pub use event::*;
pub use refresh::{RefreshDriver, DEFAULT_REFRESH_INTERVAL};
pub use remote::{HttpRemote, MemoryRemote, RemoteError, TimerRemote};
pub use store::{Snapshot, StoreError, TimerStore};
pub use tick::{TickDriver, DEFAULT_TICK_INTERVAL};
