//! Domain error types.
//!
//! These errors represent violations of itinerary invariants. They are
//! distinct from query validation errors, which live in the planner.

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// More legs than the two-stop maximum allows
    #[error("itinerary has {0} legs; at most 3 are allowed")]
    TooManyLegs(usize),

    /// Consecutive legs don't meet at the same airport
    #[error("leg arriving at {0} does not connect to leg departing {1}")]
    LegsNotContiguous(String, String),

    /// Layover count doesn't match the number of connections
    #[error("{legs} legs need {} layovers, got {layovers}", .legs.saturating_sub(1))]
    LayoverCountMismatch { legs: usize, layovers: usize },
}
