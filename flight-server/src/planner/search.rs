//! Itinerary search.
//!
//! Enumerates direct, one-stop and two-stop itineraries from the query
//! origin to the query destination, starting from flights that depart on
//! the query date in the origin's local time.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{AirportCode, DomainError, Flight, Itinerary, canonicalize, parse_date};
use crate::index::{FlightIndex, IndexError};

use super::config::SearchConfig;
use super::connection::{ConnectionCheck, arrival_instant, check_connection, departure_instant};
use super::rank::{Candidate, rank_itineraries};

/// Which end of the query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Malformed or unrecognised airport code
    #[error("invalid {endpoint} airport code: {code}")]
    InvalidAirportCode { endpoint: Endpoint, code: String },

    /// Date is not `YYYY-MM-DD`
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// A flight references an airport missing from the dataset
    #[error("unknown airport: {0}")]
    UnknownAirport(String),

    /// An airport's timezone does not resolve
    #[error("invalid timezone for airport {airport}: {timezone:?}")]
    InvalidTimezone { airport: String, timezone: String },

    /// Assembled itinerary broke an invariant
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(#[from] DomainError),
}

impl SearchError {
    /// True for errors caused by bad data rather than bad input.
    pub fn is_data_integrity(&self) -> bool {
        !matches!(
            self,
            SearchError::InvalidAirportCode { .. } | SearchError::InvalidDate(_)
        )
    }
}

impl From<IndexError> for SearchError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::UnknownAirport(code) => SearchError::UnknownAirport(code),
            IndexError::InvalidTimezone { airport, timezone } => {
                SearchError::InvalidTimezone { airport, timezone }
            }
        }
    }
}

/// Request for itinerary search.
///
/// Fields are raw caller input; the planner canonicalizes them.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
        }
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Canonicalized origin code.
    pub origin: String,

    /// Canonicalized destination code.
    pub destination: String,

    /// The query date as given.
    pub date: String,

    /// Found itineraries, shortest first.
    pub itineraries: Vec<Itinerary>,

    /// Number of connections evaluated during search.
    pub connections_checked: usize,
}

impl SearchResult {
    /// Number of itineraries found.
    pub fn count(&self) -> usize {
        self.itineraries.len()
    }
}

/// Itinerary planner over an immutable flight index.
///
/// Holds only shared references, so any number of planners may search the
/// same index concurrently.
pub struct Planner<'a> {
    index: &'a FlightIndex,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(index: &'a FlightIndex, config: &'a SearchConfig) -> Self {
        Self { index, config }
    }

    /// Search for itineraries matching the request.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let origin = canonicalize(&request.origin);
        let destination = canonicalize(&request.destination);

        let mut result = SearchResult {
            origin,
            destination,
            date: request.date.clone(),
            itineraries: Vec::new(),
            connections_checked: 0,
        };

        // Same airport at both ends is answered with nothing, not an error.
        if result.origin == result.destination {
            return Ok(result);
        }

        self.validate_code(Endpoint::Origin, &result.origin)?;
        self.validate_code(Endpoint::Destination, &result.destination)?;
        self.require_known(Endpoint::Origin, &result.origin)?;
        self.require_known(Endpoint::Destination, &result.destination)?;

        let date =
            parse_date(&request.date).map_err(|_| SearchError::InvalidDate(request.date.clone()))?;

        let first_legs: Vec<&Arc<Flight>> = self
            .index
            .flights_from(&result.origin)
            .iter()
            .filter(|f| f.departs_on(date))
            .collect();

        let mut search = Enumeration {
            planner: self,
            destination: &result.destination,
            candidates: Vec::new(),
            connections_checked: 0,
        };
        search.direct(&first_legs)?;
        let direct = search.candidates.len();
        search.one_stop(&first_legs)?;
        let one_stop = search.candidates.len() - direct;
        search.two_stop(&first_legs)?;
        let two_stop = search.candidates.len() - direct - one_stop;

        debug!(
            origin = %result.origin,
            destination = %result.destination,
            date = %result.date,
            first_legs = first_legs.len(),
            direct,
            one_stop,
            two_stop,
            connections_checked = search.connections_checked,
            "itinerary search complete"
        );

        result.connections_checked = search.connections_checked;
        result.itineraries = rank_itineraries(search.candidates);
        Ok(result)
    }

    fn validate_code(&self, endpoint: Endpoint, code: &str) -> Result<(), SearchError> {
        AirportCode::parse(code)
            .map(|_| ())
            .map_err(|_| SearchError::InvalidAirportCode {
                endpoint,
                code: code.to_string(),
            })
    }

    fn require_known(&self, endpoint: Endpoint, code: &str) -> Result<(), SearchError> {
        match self.index.airport(code) {
            Some(_) => Ok(()),
            None => Err(SearchError::InvalidAirportCode {
                endpoint,
                code: code.to_string(),
            }),
        }
    }
}

/// Per-query enumeration state.
struct Enumeration<'p, 'a> {
    planner: &'p Planner<'a>,
    destination: &'p str,
    candidates: Vec<Candidate>,
    connections_checked: usize,
}

impl Enumeration<'_, '_> {
    fn direct(&mut self, first_legs: &[&Arc<Flight>]) -> Result<(), SearchError> {
        for f1 in first_legs {
            if f1.destination == self.destination {
                self.emit(vec![Arc::clone(f1)], Vec::new())?;
            }
        }
        Ok(())
    }

    fn one_stop(&mut self, first_legs: &[&Arc<Flight>]) -> Result<(), SearchError> {
        let index = self.planner.index;
        for f1 in first_legs {
            for f2 in index.flights_from(&f1.destination) {
                if f2.destination != self.destination {
                    continue;
                }
                let Some(layover) = self.connect(f1, f2)? else {
                    continue;
                };
                self.emit(vec![Arc::clone(f1), Arc::clone(f2)], vec![layover])?;
            }
        }
        Ok(())
    }

    fn two_stop(&mut self, first_legs: &[&Arc<Flight>]) -> Result<(), SearchError> {
        let index = self.planner.index;
        for f1 in first_legs {
            for f2 in index.flights_from(&f1.destination) {
                let Some(first_layover) = self.connect(f1, f2)? else {
                    continue;
                };
                for f3 in index.flights_from(&f2.destination) {
                    if f3.destination != self.destination {
                        continue;
                    }
                    let Some(second_layover) = self.connect(f2, f3)? else {
                        continue;
                    };
                    self.emit(
                        vec![Arc::clone(f1), Arc::clone(f2), Arc::clone(f3)],
                        vec![first_layover, second_layover],
                    )?;
                }
            }
        }
        Ok(())
    }

    fn connect(
        &mut self,
        arriving: &Flight,
        departing: &Flight,
    ) -> Result<Option<chrono::Duration>, SearchError> {
        self.connections_checked += 1;
        let check = check_connection(self.planner.index, self.planner.config, arriving, departing)?;
        if let ConnectionCheck::Invalid(reason) = check {
            trace!(
                arriving = %arriving.flight_number,
                departing = %departing.flight_number,
                %reason,
                "connection rejected"
            );
        }
        Ok(check.layover())
    }

    fn emit(
        &mut self,
        legs: Vec<Arc<Flight>>,
        layovers: Vec<chrono::Duration>,
    ) -> Result<(), SearchError> {
        let index = self.planner.index;
        let departure = departure_instant(index, &legs[0])?;
        let arrival = arrival_instant(index, &legs[legs.len() - 1])?;
        let itinerary = Itinerary::new(legs, layovers, departure, arrival)?;

        self.candidates.push(Candidate {
            sequence: self.candidates.len(),
            itinerary,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
