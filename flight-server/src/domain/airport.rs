//! Airport metadata.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// An airport as described by the dataset.
///
/// The `code` is stored canonicalized (uppercase) once the airport has been
/// placed in a [`FlightIndex`](crate::index::FlightIndex). The timezone is
/// kept as the raw identifier; it is only resolved when a flight leg needs
/// it, so a bad identifier surfaces as a query error rather than a load
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub timezone: String,
}

impl Airport {
    /// Resolve the IANA timezone identifier.
    ///
    /// An empty identifier resolves to UTC.
    pub fn resolve_timezone(&self) -> Option<Tz> {
        if self.timezone.is_empty() {
            return Some(Tz::UTC);
        }
        self.timezone.parse().ok()
    }
}
