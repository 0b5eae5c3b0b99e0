//! Time-expanded graph construction.
//!
//! Every call of every trip becomes one or two stop events (arrival and
//! departure). Two kinds of edge join them:
//!
//! - a ride edge from a call's departure to the next call's arrival
//! - a wait edge between consecutive events at the same stop, whatever
//!   trips they belong to
//!
//! Edge weights are the elapsed seconds between the two events.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ServiceTime, Stop, StopEvent};
use crate::graph::{DiGraph, WeightedGraph};
use crate::stops::StopRegistry;

use super::error::ScheduleError;
use super::events::EventStore;
use super::loader::{CallRecord, ScheduleData};
use super::timetable::Timetable;

/// A call with its stop resolved and its times validated.
#[derive(Debug)]
struct ResolvedCall {
    stop: Arc<Stop>,
    arrival: Option<ServiceTime>,
    departure: Option<ServiceTime>,
}

/// Incrementally builds a [`Timetable`].
///
/// Stops must be added before the trips that call at them. A trip that
/// fails validation leaves the builder unchanged.
#[derive(Debug, Default)]
pub struct TimetableBuilder {
    stops: StopRegistry,
    graph: DiGraph<StopEvent>,
    departures: EventStore,
    times_by_stop: HashMap<Arc<Stop>, BTreeSet<ServiceTime>>,
    trip_ids: HashSet<String>,
}

impl TimetableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    pub fn add_stop(&mut self, stop: Stop) -> Result<Arc<Stop>, ScheduleError> {
        Ok(self.stops.insert(stop)?)
    }

    /// Add a trip from its calls in travel order.
    ///
    /// The first call needs a departure time and the last call an arrival
    /// time. Intermediate calls need at least one; a missing side is taken
    /// to equal the other.
    pub fn add_trip(&mut self, id: &str, calls: &[CallRecord]) -> Result<(), ScheduleError> {
        if self.trip_ids.contains(id) {
            return Err(ScheduleError::DuplicateTrip(id.to_string()));
        }
        let resolved = self.resolve_calls(id, calls)?;

        for pair in resolved.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            // Both times are present after resolve_calls.
            let (Some(dep), Some(arr)) = (from.departure, to.arrival) else {
                continue;
            };
            let weight = arr.abs_diff(dep);
            self.graph.upsert_edge(
                StopEvent::new(from.stop.clone(), dep),
                StopEvent::new(to.stop.clone(), arr),
                weight,
            );
        }

        for call in &resolved {
            let times = self.times_by_stop.entry(call.stop.clone()).or_default();
            times.extend(call.arrival);
            times.extend(call.departure);
            if let Some(dep) = call.departure {
                self.departures.insert(StopEvent::new(call.stop.clone(), dep));
            }
        }

        self.trip_ids.insert(id.to_string());
        debug!(trip = id, calls = resolved.len(), "added trip");
        Ok(())
    }

    /// Finish construction, adding the wait edges.
    pub fn build(mut self) -> Timetable {
        let mut wait_edges = 0usize;
        for (stop, times) in &self.times_by_stop {
            let times: Vec<ServiceTime> = times.iter().copied().collect();
            for pair in times.windows(2) {
                self.graph.upsert_edge(
                    StopEvent::new(stop.clone(), pair[0]),
                    StopEvent::new(stop.clone(), pair[1]),
                    pair[1].abs_diff(pair[0]),
                );
                wait_edges += 1;
            }
        }

        info!(
            stops = self.stops.len(),
            trips = self.trip_ids.len(),
            events = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            wait_edges,
            "built timetable"
        );

        Timetable::new(self.stops, self.graph, self.departures, self.trip_ids.len())
    }

    fn resolve_calls(
        &self,
        trip: &str,
        calls: &[CallRecord],
    ) -> Result<Vec<ResolvedCall>, ScheduleError> {
        if calls.len() < 2 {
            return Err(ScheduleError::TooFewCalls(trip.to_string()));
        }

        let last = calls.len() - 1;
        let mut resolved: Vec<ResolvedCall> = Vec::with_capacity(calls.len());

        for (idx, call) in calls.iter().enumerate() {
            let stop = self
                .stops
                .get(&call.stop)
                .cloned()
                .ok_or_else(|| ScheduleError::UnknownStop {
                    trip: trip.to_string(),
                    stop: call.stop.clone(),
                })?;

            let parse = |value: &Option<String>| -> Result<Option<ServiceTime>, ScheduleError> {
                value
                    .as_deref()
                    .map(ServiceTime::parse)
                    .transpose()
                    .map_err(|source| ScheduleError::InvalidTime {
                        trip: trip.to_string(),
                        stop: call.stop.clone(),
                        source,
                    })
            };
            let arrival = parse(&call.arrival)?;
            let departure = parse(&call.departure)?;

            let missing = |side| ScheduleError::MissingTime {
                trip: trip.to_string(),
                stop: call.stop.clone(),
                side,
            };
            let (arrival, departure) = if idx == 0 {
                (None, Some(departure.ok_or_else(|| missing("departure"))?))
            } else if idx == last {
                (Some(arrival.ok_or_else(|| missing("arrival"))?), None)
            } else {
                match (arrival, departure) {
                    (None, None) => return Err(missing("arrival or departure")),
                    (arr, dep) => (arr.or(dep), dep.or(arr)),
                }
            };

            let non_monotonic = || ScheduleError::NonMonotonic {
                trip: trip.to_string(),
                stop: call.stop.clone(),
            };
            if let (Some(arr), Some(dep)) = (arrival, departure) {
                if dep < arr {
                    return Err(non_monotonic());
                }
            }

            if let Some(prev) = resolved.last() {
                if prev.stop == stop {
                    return Err(ScheduleError::RepeatedStop {
                        trip: trip.to_string(),
                        stop: call.stop.clone(),
                    });
                }
                if let (Some(dep), Some(arr)) = (prev.departure, arrival) {
                    if arr < dep {
                        return Err(non_monotonic());
                    }
                }
            }

            resolved.push(ResolvedCall {
                stop,
                arrival,
                departure,
            });
        }

        Ok(resolved)
    }
}

impl Timetable {
    /// Build a timetable from a parsed schedule document.
    pub fn from_schedule(data: &ScheduleData) -> Result<Self, ScheduleError> {
        let mut builder = TimetableBuilder::new();
        for record in &data.stops {
            let stop = Stop::new(record.name.clone(), record.latitude, record.longitude).map_err(
                |source| ScheduleError::InvalidStop {
                    name: record.name.clone(),
                    source,
                },
            )?;
            builder.add_stop(stop)?;
        }
        for trip in &data.trips {
            builder.add_trip(&trip.id, &trip.calls)?;
        }
        Ok(builder.build())
    }

    /// Read a schedule file and build its timetable.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ScheduleError> {
        Self::from_schedule(&ScheduleData::from_path(path)?)
    }
}
