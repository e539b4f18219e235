//! Itinerary types.
//!
//! An itinerary is a sequence of 1-3 flights where each leg departs from
//! the airport the previous leg arrived at. Itineraries are built fresh per
//! query and never stored.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::error::DomainError;
use super::{Flight, Price, floor_minutes};

/// Maximum number of legs in an itinerary (two stops).
pub const MAX_LEGS: usize = 3;

/// A validated itinerary.
///
/// Invariants (enforced at construction):
/// - 1 to [`MAX_LEGS`] legs
/// - `legs[i].destination == legs[i + 1].origin`
/// - exactly one layover per connection
#[derive(Debug, Clone)]
pub struct Itinerary {
    legs: Vec<Arc<Flight>>,
    layovers: Vec<Duration>,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
}

impl Itinerary {
    /// Create an itinerary from its legs and layovers.
    ///
    /// `departure` is the first leg's departure instant and `arrival` the
    /// last leg's arrival instant.
    pub fn new(
        legs: Vec<Arc<Flight>>,
        layovers: Vec<Duration>,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        if legs.len() > MAX_LEGS {
            return Err(DomainError::TooManyLegs(legs.len()));
        }
        if layovers.len() != legs.len() - 1 {
            return Err(DomainError::LayoverCountMismatch {
                legs: legs.len(),
                layovers: layovers.len(),
            });
        }
        for pair in legs.windows(2) {
            if pair[0].destination != pair[1].origin {
                return Err(DomainError::LegsNotContiguous(
                    pair[0].destination.clone(),
                    pair[1].origin.clone(),
                ));
            }
        }

        Ok(Self {
            legs,
            layovers,
            departure,
            arrival,
        })
    }

    /// Returns the legs in order.
    pub fn legs(&self) -> &[Arc<Flight>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of stops (legs - 1).
    pub fn stop_count(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns true for a single-leg itinerary.
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// Returns the layovers in leg order.
    pub fn layovers(&self) -> &[Duration] {
        &self.layovers
    }

    /// Returns the layovers in whole minutes.
    pub fn layover_minutes(&self) -> Vec<i64> {
        self.layovers.iter().map(|d| floor_minutes(*d)).collect()
    }

    /// Returns the origin airport code.
    pub fn origin(&self) -> &str {
        &self.legs[0].origin
    }

    /// Returns the final destination airport code.
    pub fn destination(&self) -> &str {
        &self.legs[self.legs.len() - 1].destination
    }

    /// Returns the first departure instant.
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the last arrival instant.
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the elapsed time from first departure to last arrival,
    /// floored at zero.
    pub fn total_duration(&self) -> Duration {
        (self.arrival - self.departure).max(Duration::zero())
    }

    /// Returns the total duration in whole minutes.
    pub fn total_duration_minutes(&self) -> i64 {
        floor_minutes(self.total_duration())
    }

    /// Returns the summed price of all legs.
    pub fn total_price(&self) -> Price {
        self.legs.iter().map(|f| f.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocalTimestamp;
    use chrono::TimeZone;

    fn flight(origin: &str, destination: &str, price: f64) -> Arc<Flight> {
        Arc::new(Flight {
            flight_number: format!("SP{origin}{destination}"),
            airline: "SkyPath".into(),
            origin: origin.into(),
            destination: destination.into(),
            departure_time: LocalTimestamp::parse("2024-06-01T08:00:00").unwrap(),
            arrival_time: LocalTimestamp::parse("2024-06-01T10:00:00").unwrap(),
            price: Price::new(price).unwrap(),
            aircraft: "A320".into(),
        })
    }

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn direct_itinerary() {
        let it = Itinerary::new(vec![flight("JFK", "LAX", 200.0)], vec![], utc(12, 0), utc(18, 0))
            .unwrap();

        assert!(it.is_direct());
        assert_eq!(it.leg_count(), 1);
        assert_eq!(it.stop_count(), 0);
        assert_eq!(it.origin(), "JFK");
        assert_eq!(it.destination(), "LAX");
        assert!(it.layover_minutes().is_empty());
        assert_eq!(it.total_duration_minutes(), 360);
        assert_eq!(it.total_price().rounded(), 200.0);
    }

    #[test]
    fn two_stop_itinerary() {
        let it = Itinerary::new(
            vec![
                flight("JFK", "ORD", 100.10),
                flight("ORD", "DEN", 100.20),
                flight("DEN", "LAX", 0.005),
            ],
            vec![Duration::minutes(60), Duration::seconds(45 * 60 + 59)],
            utc(12, 0),
            utc(20, 30),
        )
        .unwrap();

        assert_eq!(it.stop_count(), 2);
        assert_eq!(it.layover_minutes(), vec![60, 45]);
        assert_eq!(it.total_duration_minutes(), 510);
        assert_eq!(it.total_price().rounded(), 200.31);
    }

    #[test]
    fn negative_duration_floors_to_zero() {
        let it = Itinerary::new(vec![flight("JFK", "LAX", 1.0)], vec![], utc(18, 0), utc(12, 0))
            .unwrap();
        assert_eq!(it.total_duration(), Duration::zero());
        assert_eq!(it.total_duration_minutes(), 0);
    }

    #[test]
    fn reject_empty() {
        let err = Itinerary::new(vec![], vec![], utc(0, 0), utc(0, 0)).unwrap_err();
        assert_eq!(err, DomainError::EmptyItinerary);
    }

    #[test]
    fn reject_too_many_legs() {
        let legs = vec![
            flight("AAA", "BBB", 1.0),
            flight("BBB", "CCC", 1.0),
            flight("CCC", "DDD", 1.0),
            flight("DDD", "EEE", 1.0),
        ];
        let layovers = vec![Duration::minutes(60); 3];
        let err = Itinerary::new(legs, layovers, utc(0, 0), utc(9, 0)).unwrap_err();
        assert_eq!(err, DomainError::TooManyLegs(4));
    }

    #[test]
    fn reject_airport_change() {
        let legs = vec![flight("JFK", "ORD", 1.0), flight("MDW", "LAX", 1.0)];
        let err =
            Itinerary::new(legs, vec![Duration::minutes(60)], utc(0, 0), utc(9, 0)).unwrap_err();
        assert_eq!(err, DomainError::LegsNotContiguous("ORD".into(), "MDW".into()));
    }

    #[test]
    fn reject_layover_mismatch() {
        let legs = vec![flight("JFK", "ORD", 1.0), flight("ORD", "LAX", 1.0)];
        let err = Itinerary::new(legs, vec![], utc(0, 0), utc(9, 0)).unwrap_err();
        assert_eq!(err, DomainError::LayoverCountMismatch { legs: 2, layovers: 0 });
    }
}
