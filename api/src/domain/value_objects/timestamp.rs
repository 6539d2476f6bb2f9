//! UTC instants with microsecond precision

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::ValidationError;

/// Postgres `timestamptz` keeps microseconds
const PRECISION_DIGITS: u16 = 6;

/// A point in time, truncated to microseconds on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(PRECISION_DIGITS))
    }

    /// Parse an RFC 3339 string, normalising its offset to UTC
    pub fn from_string(value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|_| ValidationError::Timestamp(value.to_string()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn truncates_to_microseconds() {
        let raw = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        let ts = Timestamp::from_datetime(raw);
        assert_eq!(ts.as_datetime().nanosecond(), 123_456_000);
    }

    #[test]
    fn text_round_trip() {
        let ts = Timestamp::now();
        assert_eq!(Timestamp::from_string(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn offsets_normalise_to_utc() {
        let a = Timestamp::from_string("2024-05-01T14:00:00+02:00").unwrap();
        let b = Timestamp::from_string("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(b.to_string(), "2024-05-01T12:00:00.000000Z");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Timestamp::from_string("yesterday"),
            Err(ValidationError::Timestamp("yesterday".to_string()))
        );
    }
}
