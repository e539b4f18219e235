//! Itinerary ordering for search results.

use crate::domain::Itinerary;

/// An itinerary tagged with the order it was generated in.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Position in generation order (directs, then one-stops, then
    /// two-stops, each in nested iteration order).
    pub sequence: usize,

    pub itinerary: Itinerary,
}

/// Sort key: shortest total duration first, then fewer legs, then
/// generation order.
fn rank_key(candidate: &Candidate) -> (i64, usize, usize) {
    (
        candidate.itinerary.total_duration_minutes(),
        candidate.itinerary.leg_count(),
        candidate.sequence,
    )
}

/// Rank candidates by total duration.
///
/// Ties are broken explicitly by leg count and then generation sequence,
/// so the output order does not depend on sort stability.
pub fn rank_itineraries(mut candidates: Vec<Candidate>) -> Vec<Itinerary> {
    candidates.sort_unstable_by_key(rank_key);
    candidates.into_iter().map(|c| c.itinerary).collect()
}
