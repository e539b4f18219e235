//! Domain types for the flight itinerary planner.
//!
//! This module contains the value types the index and planner are built
//! on. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod airport;
mod airport_code;
mod error;
mod flight;
mod itinerary;
mod price;
mod time;

pub use airport::Airport;
pub use airport_code::{AirportCode, InvalidAirportCode, canonicalize};
pub use error::DomainError;
pub use flight::Flight;
pub use itinerary::{Itinerary, MAX_LEGS};
pub use price::{InvalidPrice, Price, round_half_up_cents};
pub use time::{
    DATE_FORMAT, LOCAL_TIMESTAMP_FORMAT, LocalTimestamp, TimeError, floor_minutes, parse_date,
};
