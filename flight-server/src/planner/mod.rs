//! Itinerary planner.
//!
//! This module implements the search that answers: "which flights get me
//! from A to B, leaving on date D?"
//!
//! Search is exhaustive up to two stops. Every candidate connection is
//! checked against the layover rules, and the surviving itineraries are
//! ranked by total travel time.

mod config;
mod connection;
mod rank;
mod search;

pub use config::SearchConfig;
pub use connection::{
    ConnectionCheck, ConnectionKind, Rejection, arrival_instant, check_connection,
    departure_instant,
};
pub use rank::{Candidate, rank_itineraries};
pub use search::{Endpoint, Planner, SearchError, SearchRequest, SearchResult};
