//! The read-only bundle that planning runs against.

use crate::domain::StopEvent;
use crate::graph::{DiGraph, WeightedGraph};
use crate::stops::StopRegistry;

use super::events::EventStore;

/// Stops, the time-expanded graph, and the departure index of one schedule.
///
/// A timetable is immutable once built; a schedule change produces a new
/// timetable (see [`super::ScheduleHandle`]).
#[derive(Debug, Clone)]
pub struct Timetable {
    stops: StopRegistry,
    graph: DiGraph<StopEvent>,
    events: EventStore,
    trip_count: usize,
}

impl Timetable {
    pub(super) fn new(
        stops: StopRegistry,
        graph: DiGraph<StopEvent>,
        events: EventStore,
        trip_count: usize,
    ) -> Self {
        Self {
            stops,
            graph,
            events,
            trip_count,
        }
    }

    pub fn stops(&self) -> &StopRegistry {
        &self.stops
    }

    pub fn graph(&self) -> &DiGraph<StopEvent> {
        &self.graph
    }

    /// Departure events, per stop.
    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn trip_count(&self) -> usize {
        self.trip_count
    }

    /// Number of stop events (graph vertices).
    pub fn event_count(&self) -> usize {
        self.graph.vertex_count()
    }
}
