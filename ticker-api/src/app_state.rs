use time::OffsetDateTime;
use ticker::MemoryRemote;

/// Shared server state. The timer list lives in memory for the lifetime of
/// the process.
#[derive(Clone, Default)]
pub struct AppState {
    pub timers: MemoryRemote,
}

impl AppState {
    pub fn new(seed_demo_data: bool) -> Self {
        let timers = if seed_demo_data {
            MemoryRemote::seeded(OffsetDateTime::now_utc())
        } else {
            MemoryRemote::new()
        };

        Self { timers }
    }
}
