//! Stop event type: a vertex of the time-expanded graph.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::{ServiceTime, Stop};

/// A scheduled occurrence of a vehicle at a stop.
///
/// Identity is the `(stop, time)` pair. Uses `Arc<Stop>` so events are cheap
/// to clone into search maps. Events order by time first and then by stop
/// name, which gives the search a deterministic tie-break.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopEvent {
    stop: Arc<Stop>,
    time: ServiceTime,
}

impl StopEvent {
    /// Create an event at `stop` at `time`.
    pub fn new(stop: Arc<Stop>, time: ServiceTime) -> Self {
        Self { stop, time }
    }

    /// Returns the stop this event happens at.
    pub fn stop(&self) -> &Arc<Stop> {
        &self.stop
    }

    /// Returns the scheduled time.
    pub fn time(&self) -> ServiceTime {
        self.time
    }

    /// Returns true if both events happen at the same stop.
    pub fn same_stop(&self, other: &StopEvent) -> bool {
        self.stop == other.stop
    }
}

impl Ord for StopEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.stop.name().cmp(other.stop.name()))
    }
}

impl PartialOrd for StopEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for StopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopEvent({} @ {})", self.stop.name(), self.time)
    }
}

impl fmt::Display for StopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.stop.name(), self.time)
    }
}
