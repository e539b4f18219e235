//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Flight, Itinerary};
use crate::planner::SearchResult;

/// Query parameters for itinerary search.
///
/// All fields are optional at the extractor level so a missing parameter
/// produces our own error message rather than axum's.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Origin airport code
    pub origin: Option<String>,

    /// Destination airport code
    pub destination: Option<String>,

    /// Departure date, YYYY-MM-DD
    pub date: Option<String>,
}

/// One flight within an itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,

    /// Departure in origin local time, as in the source data
    pub departure_local: String,

    /// Arrival in destination local time, as in the source data
    pub arrival_local: String,

    pub price: f64,
    pub aircraft: String,
}

/// An itinerary option.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    /// Legs in travel order
    pub segments: Vec<SegmentResult>,

    /// Layover before each connecting leg, in minutes
    pub layovers_minutes: Vec<i64>,

    /// First departure to last arrival, in minutes
    pub total_duration_minutes: i64,

    /// Sum of leg prices, rounded to cents
    pub total_price: f64,
}

/// Response for itinerary search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub count: usize,

    /// Found itineraries, shortest first
    pub itineraries: Vec<ItineraryResult>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,
}

// Conversion implementations

impl SegmentResult {
    /// Create from a domain Flight.
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure_local: flight.departure_time.to_string(),
            arrival_local: flight.arrival_time.to_string(),
            price: flight.price.amount(),
            aircraft: flight.aircraft.clone(),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary
                .legs()
                .iter()
                .map(|f| SegmentResult::from_flight(f))
                .collect(),
            layovers_minutes: itinerary.layover_minutes(),
            total_duration_minutes: itinerary.total_duration_minutes(),
            total_price: itinerary.total_price().rounded(),
        }
    }
}

impl SearchResponse {
    /// Create from a planner SearchResult.
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            origin: result.origin.clone(),
            destination: result.destination.clone(),
            date: result.date.clone(),
            count: result.count(),
            itineraries: result
                .itineraries
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
        }
    }
}
