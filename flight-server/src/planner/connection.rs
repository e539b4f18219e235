//! Connection rules between consecutive legs.
//!
//! A connection is legal when the passenger stays at the same airport and
//! the layover falls within the configured bounds. The lower bound depends
//! on whether the connection is domestic or international.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::domain::Flight;
use crate::index::{FlightIndex, IndexError};

use super::config::SearchConfig;

/// Departure instant of a flight, resolved in its origin's timezone.
pub fn departure_instant(
    index: &FlightIndex,
    flight: &Flight,
) -> Result<DateTime<Utc>, IndexError> {
    let tz = index.timezone_of(&flight.origin)?;
    Ok(flight.departure_time.to_instant(&tz))
}

/// Arrival instant of a flight, resolved in its destination's timezone.
pub fn arrival_instant(
    index: &FlightIndex,
    flight: &Flight,
) -> Result<DateTime<Utc>, IndexError> {
    let tz = index.timezone_of(&flight.destination)?;
    Ok(flight.arrival_time.to_instant(&tz))
}

/// Whether a connection stays inside one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Domestic,
    International,
}

impl ConnectionKind {
    /// Classify the connection from `arriving` onto `departing`.
    ///
    /// Domestic only when both flights are internal to the same country.
    /// Any airport without a known country makes it international.
    pub fn classify(index: &FlightIndex, arriving: &Flight, departing: &Flight) -> Self {
        let countries = (
            index.country(&arriving.origin),
            index.country(&arriving.destination),
            index.country(&departing.origin),
            index.country(&departing.destination),
        );
        match countries {
            (Some(a_from), Some(a_to), Some(d_from), Some(d_to))
                if a_from == a_to && d_from == d_to && a_to == d_from =>
            {
                ConnectionKind::Domestic
            }
            _ => ConnectionKind::International,
        }
    }

    /// Minimum layover for this kind of connection.
    pub fn min_layover(&self, config: &SearchConfig) -> Duration {
        match self {
            ConnectionKind::Domestic => config.min_domestic_layover(),
            ConnectionKind::International => config.min_international_layover(),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Domestic => f.write_str("domestic"),
            ConnectionKind::International => f.write_str("international"),
        }
    }
}

/// Why a connection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The next leg leaves from a different airport.
    AirportChange,
    /// The next leg departs before this one lands.
    DepartsBeforeArrival,
    /// The layover exceeds the maximum.
    TooLong,
    /// The layover is under the minimum for its kind.
    TooShort(ConnectionKind),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AirportChange => f.write_str("airport change"),
            Rejection::DepartsBeforeArrival => f.write_str("departs before arrival"),
            Rejection::TooLong => f.write_str("layover too long"),
            Rejection::TooShort(kind) => write!(f, "layover too short for {kind} connection"),
        }
    }
}

/// Outcome of checking one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionCheck {
    Valid { layover: Duration, kind: ConnectionKind },
    Invalid(Rejection),
}

impl ConnectionCheck {
    /// Returns the layover if the connection is valid.
    pub fn layover(&self) -> Option<Duration> {
        match self {
            ConnectionCheck::Valid { layover, .. } => Some(*layover),
            ConnectionCheck::Invalid(_) => None,
        }
    }
}

/// Check whether a passenger can connect from `arriving` onto `departing`.
///
/// Rules are applied in order and the first failure wins. Timezone
/// failures are returned as errors rather than treated as rejections.
pub fn check_connection(
    index: &FlightIndex,
    config: &SearchConfig,
    arriving: &Flight,
    departing: &Flight,
) -> Result<ConnectionCheck, IndexError> {
    if arriving.destination != departing.origin {
        return Ok(ConnectionCheck::Invalid(Rejection::AirportChange));
    }

    let landed = arrival_instant(index, arriving)?;
    let leaves = departure_instant(index, departing)?;
    let layover = leaves - landed;

    if layover < Duration::zero() {
        return Ok(ConnectionCheck::Invalid(Rejection::DepartsBeforeArrival));
    }
    if layover > config.max_layover() {
        return Ok(ConnectionCheck::Invalid(Rejection::TooLong));
    }

    let kind = ConnectionKind::classify(index, arriving, departing);
    if layover < kind.min_layover(config) {
        return Ok(ConnectionCheck::Invalid(Rejection::TooShort(kind)));
    }

    Ok(ConnectionCheck::Valid { layover, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::domain::{Airport, LocalTimestamp, Price};

    fn airport(code: &str, country: &str, tz: &str) -> Airport {
        Airport {
            code: code.into(),
            name: code.into(),
            city: code.into(),
            country: country.into(),
            timezone: tz.into(),
        }
    }

    fn index() -> FlightIndex {
        FlightIndex::build(Dataset {
            airports: vec![
                airport("JFK", "US", "America/New_York"),
                airport("ORD", "US", "America/Chicago"),
                airport("LAX", "US", "America/Los_Angeles"),
                airport("YYZ", "CA", "America/Toronto"),
                airport("LHR", "GB", "Europe/London"),
                airport("BAD", "US", "Nowhere/Special"),
            ],
            flights: vec![],
        })
    }

    fn flight(origin: &str, destination: &str, dep: &str, arr: &str) -> Flight {
        Flight {
            flight_number: format!("{origin}{destination}"),
            airline: "SkyPath".into(),
            origin: origin.into(),
            destination: destination.into(),
            departure_time: LocalTimestamp::parse(dep).unwrap(),
            arrival_time: LocalTimestamp::parse(arr).unwrap(),
            price: Price::new(100.0).unwrap(),
            aircraft: "A320".into(),
        }
    }

    fn check(arriving: &Flight, departing: &Flight) -> ConnectionCheck {
        check_connection(&index(), &SearchConfig::default(), arriving, departing).unwrap()
    }

    #[test]
    fn classify_domestic() {
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("ORD", "LAX", "2024-06-01T11:00:00", "2024-06-01T13:00:00");
        assert_eq!(ConnectionKind::classify(&index(), &f1, &f2), ConnectionKind::Domestic);
    }

    #[test]
    fn classify_international_when_any_leg_crosses_border() {
        let idx = index();
        let inbound = flight("LHR", "JFK", "2024-06-01T08:00:00", "2024-06-01T11:00:00");
        let domestic = flight("JFK", "ORD", "2024-06-01T13:00:00", "2024-06-01T15:00:00");
        let outbound = flight("JFK", "YYZ", "2024-06-01T13:00:00", "2024-06-01T15:00:00");
        let feeder = flight("ORD", "JFK", "2024-06-01T08:00:00", "2024-06-01T11:00:00");

        assert_eq!(
            ConnectionKind::classify(&idx, &inbound, &domestic),
            ConnectionKind::International
        );
        assert_eq!(
            ConnectionKind::classify(&idx, &feeder, &outbound),
            ConnectionKind::International
        );
    }

    #[test]
    fn classify_unknown_country_is_international() {
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("ORD", "ZZZ", "2024-06-01T11:00:00", "2024-06-01T13:00:00");
        assert_eq!(ConnectionKind::classify(&index(), &f1, &f2), ConnectionKind::International);
    }

    #[test]
    fn airport_change_rejected_before_timezones() {
        // QQQ is unknown, but the airport check comes first.
        let f1 = flight("JFK", "QQQ", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("ORD", "LAX", "2024-06-01T11:00:00", "2024-06-01T13:00:00");
        assert_eq!(check(&f1, &f2), ConnectionCheck::Invalid(Rejection::AirportChange));
    }

    #[test]
    fn domestic_minimum() {
        // ORD local times on both sides.
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let short = flight("ORD", "LAX", "2024-06-01T10:30:00", "2024-06-01T12:30:00");
        let exact = flight("ORD", "LAX", "2024-06-01T10:45:00", "2024-06-01T12:45:00");

        assert_eq!(
            check(&f1, &short),
            ConnectionCheck::Invalid(Rejection::TooShort(ConnectionKind::Domestic))
        );
        assert_eq!(
            check(&f1, &exact),
            ConnectionCheck::Valid {
                layover: Duration::minutes(45),
                kind: ConnectionKind::Domestic
            }
        );
    }

    #[test]
    fn international_minimum_is_stricter() {
        // 60 minutes would pass domestically, not here.
        let f1 = flight("LHR", "JFK", "2024-06-01T08:00:00", "2024-06-01T11:00:00");
        let f2 = flight("JFK", "ORD", "2024-06-01T12:00:00", "2024-06-01T14:00:00");
        let f3 = flight("JFK", "ORD", "2024-06-01T12:30:00", "2024-06-01T14:30:00");

        assert_eq!(
            check(&f1, &f2),
            ConnectionCheck::Invalid(Rejection::TooShort(ConnectionKind::International))
        );
        assert_eq!(check(&f1, &f3).layover(), Some(Duration::minutes(90)));
    }

    #[test]
    fn maximum_layover() {
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let six_hours = flight("ORD", "LAX", "2024-06-01T16:00:00", "2024-06-01T18:00:00");
        let too_long = flight("ORD", "LAX", "2024-06-01T16:01:00", "2024-06-01T18:00:00");

        assert_eq!(check(&f1, &six_hours).layover(), Some(Duration::hours(6)));
        assert_eq!(check(&f1, &too_long), ConnectionCheck::Invalid(Rejection::TooLong));
    }

    #[test]
    fn departs_before_arrival() {
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("ORD", "LAX", "2024-06-01T09:59:00", "2024-06-01T12:00:00");
        assert_eq!(check(&f1, &f2), ConnectionCheck::Invalid(Rejection::DepartsBeforeArrival));
    }

    #[test]
    fn international_connection_above_minimum() {
        // Lands 10:00 Chicago, leaves 12:30 Chicago for Toronto.
        let f1 = flight("JFK", "ORD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("ORD", "YYZ", "2024-06-01T12:30:00", "2024-06-01T15:00:00");
        assert_eq!(
            check(&f1, &f2),
            ConnectionCheck::Valid {
                layover: Duration::minutes(150),
                kind: ConnectionKind::International
            }
        );
    }

    #[test]
    fn bad_timezone_is_error() {
        let f1 = flight("JFK", "BAD", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("BAD", "LAX", "2024-06-01T11:00:00", "2024-06-01T13:00:00");
        let err = check_connection(&index(), &SearchConfig::default(), &f1, &f2).unwrap_err();
        assert!(matches!(err, IndexError::InvalidTimezone { .. }));
    }

    #[test]
    fn unknown_airport_is_error() {
        let f1 = flight("JFK", "QQQ", "2024-06-01T08:00:00", "2024-06-01T10:00:00");
        let f2 = flight("QQQ", "LAX", "2024-06-01T11:00:00", "2024-06-01T13:00:00");
        let err = check_connection(&index(), &SearchConfig::default(), &f1, &f2).unwrap_err();
        assert_eq!(err, IndexError::UnknownAirport("QQQ".into()));
    }
}
