//! Departure event index.
//!
//! The planner never searches from an arbitrary point in time: it boards the
//! earliest scheduled departure at the origin within the wait tolerance. This
//! store answers that question with a binary search over each stop's
//! departures.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ServiceTime, Stop, StopEvent};

/// Scheduled departure events, grouped by stop and sorted by time.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    departures: HashMap<Arc<Stop>, Vec<StopEvent>>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a departure event. Returns false if it was already known.
    pub fn insert(&mut self, event: StopEvent) -> bool {
        let events = self.departures.entry(event.stop().clone()).or_default();
        match events.binary_search_by_key(&event.time(), StopEvent::time) {
            Ok(_) => false,
            Err(idx) => {
                events.insert(idx, event);
                true
            }
        }
    }

    /// All departure events at `stop`, earliest first.
    pub fn events_at(&self, stop: &Stop) -> &[StopEvent] {
        self.departures
            .get(stop)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The earliest departure at `stop` no earlier than `after` and at most
    /// `max_wait_secs` later.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transit_planner::domain::{ServiceTime, Stop, StopEvent};
    /// use transit_planner::schedule::EventStore;
    ///
    /// let stop = Arc::new(Stop::new("A", 0.0, 0.0).unwrap());
    /// let mut store = EventStore::new();
    /// store.insert(StopEvent::new(stop.clone(), ServiceTime::from_secs(600).unwrap()));
    ///
    /// let t = ServiceTime::from_secs(500).unwrap();
    /// assert!(store.feasible_start(&stop, t, 100).is_some());
    /// assert!(store.feasible_start(&stop, t, 99).is_none());
    /// ```
    pub fn feasible_start(
        &self,
        stop: &Stop,
        after: ServiceTime,
        max_wait_secs: u32,
    ) -> Option<&StopEvent> {
        let events = self.events_at(stop);
        let idx = events.partition_point(|e| e.time() < after);
        events
            .get(idx)
            .filter(|e| e.time().secs_since(after).is_some_and(|wait| wait <= max_wait_secs))
    }

    /// Total number of departure events.
    pub fn len(&self) -> usize {
        self.departures.values().map(Vec::len).sum()
    }

    /// Returns true if no departures are registered.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str) -> Arc<Stop> {
        Arc::new(Stop::new(name, 0.0, 0.0).unwrap())
    }

    fn t(secs: u32) -> ServiceTime {
        ServiceTime::from_secs(secs).unwrap()
    }

    fn store_with(stop: &Arc<Stop>, times: &[u32]) -> EventStore {
        let mut store = EventStore::new();
        for &secs in times {
            store.insert(StopEvent::new(stop.clone(), t(secs)));
        }
        store
    }

    #[test]
    fn empty_store() {
        let store = EventStore::new();
        assert!(store.is_empty());
        assert!(store.events_at(&stop("A")).is_empty());
        assert!(store.feasible_start(&stop("A"), t(0), 1000).is_none());
    }

    #[test]
    fn events_sorted_and_deduplicated() {
        let a = stop("A");
        let mut store = store_with(&a, &[600, 0, 300]);
        assert!(!store.insert(StopEvent::new(a.clone(), t(300))));

        let times: Vec<_> = store.events_at(&a).iter().map(|e| e.time().as_secs()).collect();
        assert_eq!(times, vec![0, 300, 600]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn events_keyed_by_stop_name() {
        let a = stop("A");
        let store = store_with(&a, &[10]);
        assert_eq!(store.events_at(&Stop::new("A", 5.0, 5.0).unwrap()).len(), 1);
        assert!(store.events_at(&stop("B")).is_empty());
    }

    #[test]
    fn feasible_start_exact_time() {
        let a = stop("A");
        let store = store_with(&a, &[0, 600]);
        let start = store.feasible_start(&a, t(0), 0).unwrap();
        assert_eq!(start.time(), t(0));
    }

    #[test]
    fn feasible_start_picks_earliest_in_window() {
        let a = stop("A");
        let store = store_with(&a, &[100, 200, 300]);
        let start = store.feasible_start(&a, t(150), 1000).unwrap();
        assert_eq!(start.time(), t(200));
    }

    #[test]
    fn feasible_start_window_is_inclusive() {
        let a = stop("A");
        let store = store_with(&a, &[600]);
        assert!(store.feasible_start(&a, t(0), 600).is_some());
        assert!(store.feasible_start(&a, t(0), 599).is_none());
    }

    #[test]
    fn no_feasible_start_between_departures() {
        let a = stop("A");
        let store = store_with(&a, &[0, 600]);
        assert!(store.feasible_start(&a, t(50), 0).is_none());
    }

    #[test]
    fn past_departures_never_chosen() {
        let a = stop("A");
        let store = store_with(&a, &[0, 100]);
        assert!(store.feasible_start(&a, t(101), 10_000).is_none());
    }
}
