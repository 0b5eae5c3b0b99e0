//! Stop registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::Stop;

/// Error returned when registering a stop whose name is already taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate stop name: {0}")]
pub struct DuplicateStop(pub String);

/// The set of stops known to a schedule.
///
/// Iteration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Arc<Stop>>,
    by_name: HashMap<String, usize>,
}

impl StopRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop, returning the shared handle stored in the registry.
    pub fn insert(&mut self, stop: Stop) -> Result<Arc<Stop>, DuplicateStop> {
        if self.by_name.contains_key(stop.name()) {
            return Err(DuplicateStop(stop.name().to_string()));
        }
        let stop = Arc::new(stop);
        self.by_name.insert(stop.name().to_string(), self.stops.len());
        self.stops.push(stop.clone());
        Ok(stop)
    }

    /// Look up a stop by its exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&Arc<Stop>> {
        self.by_name.get(name).map(|&idx| &self.stops[idx])
    }

    /// Find every stop whose name contains `pattern`, ignoring case.
    ///
    /// Matching is unanchored, and an empty pattern matches every stop.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::Stop;
    /// use transit_planner::stops::StopRegistry;
    ///
    /// let mut registry = StopRegistry::new();
    /// registry.insert(Stop::new("Central Station", 0.0, 0.0).unwrap()).unwrap();
    /// registry.insert(Stop::new("Harbour", 0.0, 0.0).unwrap()).unwrap();
    ///
    /// let found = registry.find_by_substring("STATION");
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].name(), "Central Station");
    /// ```
    pub fn find_by_substring(&self, pattern: &str) -> Vec<Arc<Stop>> {
        let needle = pattern.to_lowercase();
        self.stops
            .iter()
            .filter(|stop| stop.name().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if no stops are registered.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
