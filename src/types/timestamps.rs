// src/types/timestamps.rs
//! Publish timestamps in the feed's fixed `yyyy-MM-dd HH:mm:ss` UTC format.

use super::ValidationError;
use crate::constants::PUBLISH_TIME_FORMAT;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// chrono accepts single-digit fields for %m/%d/%H; the feed format does not.
static PUBLISH_TIME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$")
        .expect("Failed to compile publish time regex - this is a bug in the code")
});

/// The instant an item was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublishTime(DateTime<Utc>);

impl PublishTime {
    /// Parses a timestamp that must match the feed format exactly.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if !PUBLISH_TIME_SHAPE.is_match(input) {
            return Err(ValidationError::InvalidTimestamp {
                value: input.to_string(),
                reason: format!("expected format {}", PUBLISH_TIME_FORMAT),
            });
        }

        NaiveDateTime::parse_from_str(input, PUBLISH_TIME_FORMAT)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|e| ValidationError::InvalidTimestamp {
                value: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds from publication until `now`. Negative for items dated
    /// in the future.
    pub fn seconds_until(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.0).num_seconds()
    }
}

impl fmt::Display for PublishTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PUBLISH_TIME_FORMAT))
    }
}

impl Serialize for PublishTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublishTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublishTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parses_exact_format_as_utc() {
        let time = PublishTime::parse("2024-03-09 17:05:42").unwrap();
        assert_eq!(
            time.as_datetime(),
            Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 42).unwrap()
        );
        assert_eq!(time.to_string(), "2024-03-09 17:05:42");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(PublishTime::parse("2024-3-9 17:05:42").is_err());
        assert!(PublishTime::parse("2024-03-09T17:05:42").is_err());
        assert!(PublishTime::parse("2024-03-09 17:05:42Z").is_err());
        assert!(PublishTime::parse("2024-03-09").is_err());
        assert!(PublishTime::parse("2024-02-30 10:00:00").is_err());
        assert!(PublishTime::parse("").is_err());
    }

    #[test]
    fn test_seconds_until_is_signed() {
        let time = PublishTime::parse("2024-01-01 00:00:00").unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(time.seconds_until(later), 60);
        assert_eq!(time.seconds_until(earlier), -60);
    }
}
