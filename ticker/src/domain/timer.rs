use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::TimerId;
use crate::elapsed;

/// Whether a timer is currently accumulating time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// A titled, project-tagged stopwatch.
///
/// `elapsed` only holds time accumulated by completed runs. While running, the
/// current run is derived on demand from `running_since`, so a timer is
/// running exactly when `running_since` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: TimerId,
    pub title: String,
    pub project: String,
    #[serde(with = "crate::serde_millis::duration")]
    pub elapsed: Duration,
    #[serde(with = "time::serde::timestamp::milliseconds_i64::option", default)]
    pub running_since: Option<OffsetDateTime>,
}

impl Timer {
    /// A fresh, stopped timer with nothing accumulated.
    pub fn new(id: TimerId, title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            project: project.into(),
            elapsed: Duration::ZERO,
            running_since: None,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed.max(Duration::ZERO);
        self
    }

    pub fn with_running_since(mut self, since: OffsetDateTime) -> Self {
        self.running_since = Some(since);
        self
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn state(&self) -> TimerState {
        if self.is_running() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Accumulated time plus the current run, evaluated at `now`.
    pub fn total_elapsed(&self, now: OffsetDateTime) -> Duration {
        elapsed::total_elapsed(self.elapsed, self.running_since, now)
    }

    /// `HH:MM:SS` display at `now`.
    pub fn display_at(&self, now: OffsetDateTime) -> String {
        elapsed::render_elapsed(self.elapsed, self.running_since, now)
    }
}

/// Input of a create action. Without an id, one is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerDraft {
    pub id: Option<TimerId>,
    pub title: String,
    pub project: String,
}

impl TimerDraft {
    pub fn new(title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            project: project.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<TimerId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Input of an update action: the only fields an edit may touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerPatch {
    pub id: TimerId,
    pub title: String,
    pub project: String,
}

impl TimerPatch {
    pub fn new(id: TimerId, title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            project: project.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn wire_shape_uses_camel_case_millis() {
        let timer = Timer::new(TimerId::from("t-1"), "Practice squat", "Gym Chores")
            .with_elapsed(Duration::milliseconds(127_998))
            .with_running_since(datetime!(1970-01-01 00:00:01 UTC));

        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "t-1",
                "title": "Practice squat",
                "project": "Gym Chores",
                "elapsed": 127998,
                "runningSince": 1000
            })
        );
    }

    #[test]
    fn missing_running_since_decodes_as_stopped() {
        let timer: Timer = serde_json::from_str(
            r#"{"id":"t-2","title":"Bake squash","project":"Kitchen Chores","elapsed":0}"#,
        )
        .unwrap();
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn null_running_since_decodes_and_encodes_as_null() {
        let timer: Timer = serde_json::from_str(
            r#"{"id":"t-3","title":"T","project":"P","elapsed":250,"runningSince":null}"#,
        )
        .unwrap();
        assert_eq!(timer.running_since, None);
        assert_eq!(timer.elapsed, Duration::milliseconds(250));

        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["runningSince"], serde_json::Value::Null);
    }

    #[test]
    fn display_includes_current_run() {
        let start = datetime!(2024-03-01 09:00 UTC);
        let timer = Timer::new(TimerId::generate(), "Write report", "Office")
            .with_elapsed(Duration::minutes(5))
            .with_running_since(start);

        assert_eq!(timer.display_at(start + Duration::minutes(2)), "00:07:00");
    }
}
