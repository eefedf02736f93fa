//! Serde adapter for durations on the integer-millisecond wire format.
//!
//! Timestamps use `time::serde::timestamp::milliseconds_i64` directly.

use serde::{Deserialize, Deserializer, Serializer};
use time::Duration;

/// `time::Duration` as whole milliseconds. Negative input decodes as zero.
pub mod duration {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.whole_milliseconds() as i64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        Ok(Duration::milliseconds(millis.max(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde(with = "duration")]
        elapsed: Duration,
    }

    #[test]
    fn truncates_sub_millisecond_precision() {
        let sample = Sample {
            elapsed: Duration::microseconds(1_999),
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"elapsed":1}"#);
    }

    #[test]
    fn negative_elapsed_clamps_to_zero() {
        let sample: Sample = serde_json::from_str(r#"{"elapsed":-40}"#).unwrap();
        assert_eq!(sample.elapsed, Duration::ZERO);
    }
}
