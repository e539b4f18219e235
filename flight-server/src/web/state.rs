//! Application state for the web layer.

use std::sync::Arc;

use crate::index::FlightIndex;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The index is immutable after construction, so handlers read it
/// concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    /// Airports and flights
    pub index: Arc<FlightIndex>,

    /// Layover rules
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(index: FlightIndex, config: SearchConfig) -> Self {
        Self {
            index: Arc::new(index),
            config: Arc::new(config),
        }
    }
}
