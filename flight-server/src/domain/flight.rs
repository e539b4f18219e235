//! Scheduled flights.

use serde::{Deserialize, Serialize};

use super::{LocalTimestamp, Price};

/// A single scheduled flight.
///
/// Departure and arrival are local wall-clock times at the origin and
/// destination airports respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: LocalTimestamp,
    pub arrival_time: LocalTimestamp,
    pub price: Price,
    pub aircraft: String,
}

impl Flight {
    /// Uppercase the origin and destination codes in place.
    pub fn canonicalize_codes(&mut self) {
        self.origin = self.origin.to_uppercase();
        self.destination = self.destination.to_uppercase();
    }

    /// Returns true if this flight departs on `date` in origin local time.
    pub fn departs_on(&self, date: chrono::NaiveDate) -> bool {
        self.departure_time.date() == date
    }
}
