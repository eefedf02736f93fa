use std::sync::atomic::{AtomicI64, Ordering};
use time::{Duration, OffsetDateTime};

/// Source of "now" for mutations and display.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A manually advanced clock, for tests and demos.
#[derive(Debug)]
pub struct FixedClock {
    origin: OffsetDateTime,
    offset_ms: AtomicI64,
}

impl FixedClock {
    pub fn new(origin: OffsetDateTime) -> Self {
        Self {
            origin,
            offset_ms: AtomicI64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset_ms
            .fetch_add(by.whole_milliseconds() as i64, Ordering::SeqCst);
    }

    pub fn set(&self, at: OffsetDateTime) {
        self.offset_ms
            .store((at - self.origin).whole_milliseconds() as i64, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.origin + Duration::milliseconds(self.offset_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fixed_clock_only_moves_when_told() {
        let clock = FixedClock::new(datetime!(2024-03-01 12:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-03-01 12:00 UTC));

        clock.advance(Duration::milliseconds(1_500));
        assert_eq!(clock.now(), datetime!(2024-03-01 12:00:01.5 UTC));

        clock.set(datetime!(2024-03-01 11:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-03-01 11:00 UTC));
    }
}
