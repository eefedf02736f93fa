//! Request bodies of the remote contract, shared by client and server.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::TimerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTimerRequest {
    pub id: TimerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTimerRequest {
    pub id: TimerId,
    #[serde(with = "time::serde::timestamp::milliseconds_i64")]
    pub start: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTimerRequest {
    pub id: TimerId,
    #[serde(with = "time::serde::timestamp::milliseconds_i64")]
    pub stop: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::Duration;

    #[test]
    fn start_and_stop_send_epoch_millis() {
        let start = StartTimerRequest {
            id: TimerId::from("t"),
            start: datetime!(1970-01-01 00:00:01 UTC) + Duration::microseconds(700),
        };
        assert_eq!(
            serde_json::to_string(&start).unwrap(),
            r#"{"id":"t","start":1000}"#
        );

        let stop: StopTimerRequest =
            serde_json::from_str(r#"{"id":"t","stop":1709283600123}"#).unwrap();
        assert_eq!(stop.stop, datetime!(2024-03-01 09:00:00.123 UTC));
    }
}
