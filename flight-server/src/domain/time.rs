//! Local wall-clock time handling.
//!
//! Flight data carries departure and arrival times as naive local
//! timestamps (`YYYY-MM-DDTHH:MM:SS`, no offset). They only become
//! comparable once resolved against the timezone of the airport they
//! belong to. This module provides the timestamp type, the query date
//! parser, and that resolution step.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format of local timestamps in source data and responses.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Display format; adds a fractional-seconds field only when one is set.
const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Format of query dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when parsing an invalid timestamp or date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A naive local timestamp as it appears in the flight data.
///
/// # Examples
///
/// ```
/// use flight_server::domain::LocalTimestamp;
///
/// let ts = LocalTimestamp::parse("2024-06-01T08:00:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-06-01T08:00:00");
///
/// assert!(LocalTimestamp::parse("2024-06-01 08:00").is_err());
/// assert!(LocalTimestamp::parse("2024-06-01T08:00:00Z").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTimestamp(NaiveDateTime);

impl LocalTimestamp {
    /// Create from a `NaiveDateTime`.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Parse from `YYYY-MM-DDTHH:MM:SS`, with optional fractional seconds.
    ///
    /// Digits past nanosecond precision are dropped.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        const SHAPE: &str = "expected YYYY-MM-DDTHH:MM:SS";

        if s.len() < 19 || !s.is_char_boundary(19) || s.as_bytes()[10] != b'T' {
            return Err(TimeError::new(SHAPE));
        }
        let (whole, fraction) = s.split_at(19);

        // The date half is held to the same strict shape as query dates.
        parse_date(&whole[..10])?;
        let datetime = NaiveDateTime::parse_from_str(whole, LOCAL_TIMESTAMP_FORMAT)
            .map_err(|_| TimeError::new(SHAPE))?;

        if fraction.is_empty() {
            return Ok(Self(datetime));
        }
        let digits = fraction
            .strip_prefix('.')
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or(TimeError::new("malformed fractional seconds"))?;
        let nanos = digits
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(9)
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        datetime
            .with_nanosecond(nanos)
            .map(Self)
            .ok_or(TimeError::new("malformed fractional seconds"))
    }

    /// Returns the local calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Resolve this wall-clock time in `tz` to an absolute instant.
    ///
    /// The offset is first looked up at the wall time read as if it were
    /// UTC. If the instant that produces lies under a different offset, the
    /// wall time is re-read with that one. Outside DST transitions this is
    /// the only possible answer. Times that are skipped or repeated by a
    /// transition resolve to whichever offset that correction settles on:
    /// in New York 02:30 on spring-forward day reads as EDT and 01:30 on
    /// fall-back day as EDT, while in Paris the same cases read as CET.
    pub fn to_instant(&self, tz: &Tz) -> DateTime<Utc> {
        let offset_at = |utc: &NaiveDateTime| {
            let secs = tz.offset_from_utc_datetime(utc).fix().local_minus_utc();
            Duration::seconds(i64::from(secs))
        };

        let guess = offset_at(&self.0);
        let mut utc = self.0 - guess;
        let actual = offset_at(&utc);
        if actual != guess {
            utc = self.0 - actual;
        }
        Utc.from_utc_datetime(&utc)
    }
}

impl fmt::Debug for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalTimestamp({})", self)
    }
}

impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl Serialize for LocalTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LocalTimestamp::parse(&s)
            .map_err(|e| serde::de::Error::custom(format!("{e}: {s:?}")))
    }
}

/// Parse a query date in strict `YYYY-MM-DD` form.
///
/// ```
/// use flight_server::domain::parse_date;
///
/// assert!(parse_date("2024-06-01").is_ok());
/// assert!(parse_date("2024-6-1").is_err());
/// assert!(parse_date("2024-13-40").is_err());
/// assert!(parse_date("Jan 1").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TimeError::new("expected YYYY-MM-DD"));
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return Err(TimeError::new("expected YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| TimeError::new("no such calendar date"))
}

/// Whole minutes in a duration, rounded toward negative infinity.
pub fn floor_minutes(d: Duration) -> i64 {
    d.num_seconds().div_euclid(60)
}
