//! Web layer for the itinerary planner.
//!
//! Provides the JSON HTTP endpoints for health checks and itinerary search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
