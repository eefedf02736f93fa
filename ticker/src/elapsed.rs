//! Elapsed-time arithmetic and `HH:MM:SS` formatting.
//!
//! Everything here is a pure function of its inputs. Running time is never
//! cached: callers pass the evaluation instant on every repaint, so the display
//! cannot drift regardless of how often it is rendered.

use std::fmt;
use time::{Duration, OffsetDateTime};

/// Total time to show at `now`: the accumulated `elapsed` plus, when running,
/// the span since `running_since`.
///
/// A `running_since` later than `now` (clock skew against a server snapshot)
/// contributes nothing rather than a negative amount.
pub fn total_elapsed(
    elapsed: Duration,
    running_since: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Duration {
    elapsed + running_since.map_or(Duration::ZERO, |since| span_between(since, now))
}

/// Non-negative span from `from` to `to`.
pub fn span_between(from: OffsetDateTime, to: OffsetDateTime) -> Duration {
    (to - from).max(Duration::ZERO)
}

/// Hours, minutes and whole seconds of a duration. Hours are not capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedBreakdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl ElapsedBreakdown {
    /// Negative durations are treated as zero; fractional seconds are floored.
    pub fn from_duration(duration: Duration) -> Self {
        let total_seconds = duration.whole_seconds().max(0);
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for ElapsedBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Format a duration as `HH:MM:SS`.
pub fn format_elapsed(duration: Duration) -> String {
    ElapsedBreakdown::from_duration(duration).to_string()
}

/// The display string for a timer's fields evaluated at `now`.
pub fn render_elapsed(
    elapsed: Duration,
    running_since: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> String {
    format_elapsed(total_elapsed(elapsed, running_since, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn zero_stopped_timer_renders_zeroes() {
        let now = datetime!(2024-03-01 12:00 UTC);
        assert_eq!(render_elapsed(Duration::ZERO, None, now), "00:00:00");
    }

    #[test]
    fn stopped_timer_is_stable_across_evaluations() {
        let elapsed = Duration::milliseconds(5_456_099);
        let first = render_elapsed(elapsed, None, datetime!(2024-03-01 12:00 UTC));
        let later = render_elapsed(elapsed, None, datetime!(2024-03-01 18:30 UTC));
        assert_eq!(first, "01:30:56");
        assert_eq!(first, later);
    }

    #[test]
    fn running_timer_adds_span_since_start() {
        let t0 = datetime!(2024-03-01 12:00 UTC);
        let t1 = t0 + Duration::milliseconds(3_500);
        let shown = render_elapsed(Duration::seconds(60), Some(t0), t1);
        assert_eq!(shown, "00:01:03");
    }

    #[test]
    fn hours_are_not_capped_at_two_digits() {
        let shown = format_elapsed(Duration::hours(123) + Duration::minutes(4) + Duration::seconds(5));
        assert_eq!(shown, "123:04:05");
    }

    #[test]
    fn start_in_the_future_contributes_nothing() {
        let now = datetime!(2024-03-01 12:00 UTC);
        let total = total_elapsed(Duration::seconds(10), Some(now + Duration::seconds(30)), now);
        assert_eq!(total, Duration::seconds(10));
    }

    #[test]
    fn breakdown_floors_fractional_seconds() {
        let breakdown = ElapsedBreakdown::from_duration(Duration::milliseconds(61_999));
        assert_eq!(
            breakdown,
            ElapsedBreakdown {
                hours: 0,
                minutes: 1,
                seconds: 1
            }
        );
    }
}
