//! Immutable flight index.
//!
//! Built once from a [`Dataset`] and read-only afterwards, so it can be
//! shared between any number of concurrent queries behind an `Arc`
//! without locking.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono_tz::Tz;

use crate::dataset::{Dataset, DatasetError};
use crate::domain::{Airport, Flight};

/// Errors from resolving an airport's timezone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The code is not in the airport table
    #[error("unknown airport: {0}")]
    UnknownAirport(String),

    /// The airport exists but its timezone does not resolve
    #[error("invalid timezone for airport {airport}: {timezone:?}")]
    InvalidTimezone { airport: String, timezone: String },
}

/// A data-integrity problem found by [`FlightIndex::integrity_issues`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityIssue {
    #[error("flight {flight_number} references unknown airport {code}")]
    UnknownAirport { flight_number: String, code: String },

    #[error("airport {airport} has unresolvable timezone {timezone:?}")]
    InvalidTimezone { airport: String, timezone: String },
}

/// Airports by code and flights by origin.
///
/// All keys are uppercase. Lookups uppercase their argument, so callers
/// may pass codes in any case (but must trim whitespace themselves).
#[derive(Debug, Clone, Default)]
pub struct FlightIndex {
    airports_by_code: HashMap<String, Airport>,
    flights_by_origin: HashMap<String, Vec<Arc<Flight>>>,
    flight_count: usize,
}

impl FlightIndex {
    /// Build the index from a parsed dataset.
    ///
    /// Airport codes and flight origin/destination codes are uppercased.
    /// Flights keep dataset order within each origin. A repeated airport
    /// code replaces the earlier entry.
    pub fn build(dataset: Dataset) -> Self {
        let mut airports_by_code = HashMap::with_capacity(dataset.airports.len());
        for mut airport in dataset.airports {
            airport.code = airport.code.to_uppercase();
            airports_by_code.insert(airport.code.clone(), airport);
        }

        let flight_count = dataset.flights.len();
        let mut flights_by_origin: HashMap<String, Vec<Arc<Flight>>> = HashMap::new();
        for mut flight in dataset.flights {
            flight.canonicalize_codes();
            flights_by_origin
                .entry(flight.origin.clone())
                .or_default()
                .push(Arc::new(flight));
        }

        Self {
            airports_by_code,
            flights_by_origin,
            flight_count,
        }
    }

    /// Load a dataset file and build the index from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Ok(Self::build(Dataset::load(path)?))
    }

    /// Look up an airport by code.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports_by_code.get(&code.to_uppercase())
    }

    /// Look up an airport's country.
    pub fn country(&self, code: &str) -> Option<&str> {
        self.airport(code).map(|a| a.country.as_str())
    }

    /// Resolve an airport's timezone.
    pub fn timezone_of(&self, code: &str) -> Result<Tz, IndexError> {
        let airport = self
            .airport(code)
            .ok_or_else(|| IndexError::UnknownAirport(code.to_string()))?;
        airport
            .resolve_timezone()
            .ok_or_else(|| IndexError::InvalidTimezone {
                airport: airport.code.clone(),
                timezone: airport.timezone.clone(),
            })
    }

    /// Flights departing an airport, in dataset order.
    ///
    /// Empty if the airport has no departures or is unknown.
    pub fn flights_from(&self, code: &str) -> &[Arc<Flight>] {
        self.flights_by_origin
            .get(&code.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct airports.
    pub fn airport_count(&self) -> usize {
        self.airports_by_code.len()
    }

    /// Number of flights.
    pub fn flight_count(&self) -> usize {
        self.flight_count
    }

    /// Scan for data that would make queries fail.
    ///
    /// Queries still abort when they touch such data; this only lets the
    /// operator see it up front. Results are sorted for stable output.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        let mut airports: Vec<&Airport> = self.airports_by_code.values().collect();
        airports.sort_by(|a, b| a.code.cmp(&b.code));
        for airport in airports {
            if airport.resolve_timezone().is_none() {
                issues.push(IntegrityIssue::InvalidTimezone {
                    airport: airport.code.clone(),
                    timezone: airport.timezone.clone(),
                });
            }
        }

        let mut origins: Vec<&String> = self.flights_by_origin.keys().collect();
        origins.sort();
        for origin in origins {
            for flight in &self.flights_by_origin[origin] {
                for code in [&flight.origin, &flight.destination] {
                    if !self.airports_by_code.contains_key(code) {
                        issues.push(IntegrityIssue::UnknownAirport {
                            flight_number: flight.flight_number.clone(),
                            code: code.clone(),
                        });
                    }
                }
            }
        }

        issues
    }
}
