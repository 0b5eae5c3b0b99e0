//! Planner configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum time (seconds) a passenger will wait at the origin for the
    /// first departure. Departures later than this are not boarded.
    pub max_wait_secs: u32,
}

impl PlannerConfig {
    /// Create a new configuration with the given wait tolerance.
    pub fn new(max_wait_secs: u32) -> Self {
        Self { max_wait_secs }
    }

    /// Returns the wait tolerance as a Duration.
    pub fn max_wait(&self) -> Duration {
        Duration::seconds(i64::from(self.max_wait_secs))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: 30 * 60, // 30 minutes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_wait_secs, 1800);
        assert_eq!(config.max_wait(), Duration::minutes(30));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(0);
        assert_eq!(config.max_wait_secs, 0);
        assert_eq!(config.max_wait(), Duration::zero());
    }

    #[test]
    fn deserializes_from_json() {
        let config: PlannerConfig = serde_json::from_str(r#"{"max_wait_secs": 120}"#).unwrap();
        assert_eq!(config, PlannerConfig::new(120));
    }
}
