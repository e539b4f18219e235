//! Search configuration for the itinerary planner.

use chrono::Duration;

/// Layover bounds applied to every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Longest allowed layover (minutes).
    pub max_layover_mins: i64,

    /// Shortest allowed layover when the whole connection stays in one
    /// country (minutes).
    pub min_domestic_layover_mins: i64,

    /// Shortest allowed layover for any other connection (minutes).
    pub min_international_layover_mins: i64,
}

impl SearchConfig {
    /// Create a new configuration with the given bounds.
    pub fn new(
        max_layover_mins: i64,
        min_domestic_layover_mins: i64,
        min_international_layover_mins: i64,
    ) -> Self {
        Self {
            max_layover_mins,
            min_domestic_layover_mins,
            min_international_layover_mins,
        }
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }

    /// Returns the domestic minimum layover as a Duration.
    pub fn min_domestic_layover(&self) -> Duration {
        Duration::minutes(self.min_domestic_layover_mins)
    }

    /// Returns the international minimum layover as a Duration.
    pub fn min_international_layover(&self) -> Duration {
        Duration::minutes(self.min_international_layover_mins)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_layover_mins: 360, // 6 hours
            min_domestic_layover_mins: 45,
            min_international_layover_mins: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_layover_mins, 360);
        assert_eq!(config.min_domestic_layover_mins, 45);
        assert_eq!(config.min_international_layover_mins, 90);
    }

    #[test]
    fn duration_methods() {
        let config = SearchConfig::default();

        assert_eq!(config.max_layover(), Duration::hours(6));
        assert_eq!(config.min_domestic_layover(), Duration::minutes(45));
        assert_eq!(config.min_international_layover(), Duration::minutes(90));
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(240, 30, 60);

        assert_eq!(config.max_layover(), Duration::hours(4));
        assert_eq!(config.min_domestic_layover_mins, 30);
        assert_eq!(config.min_international_layover_mins, 60);
    }
}
