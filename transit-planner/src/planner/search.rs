//! Route search over a timetable.
//!
//! Boards the earliest feasible departure at the origin, runs shortest
//! paths over the time-expanded graph, picks the earliest reachable event
//! at the destination, and rebuilds the itinerary from the trace.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{Itinerary, ServiceTime, Stop, StopEvent};
use crate::graph::WeightedGraph;
use crate::schedule::Timetable;

use super::cancel::CancelToken;
use super::config::PlannerConfig;
use super::dijkstra::{ShortestPaths, shortest_paths};
use super::itinerary::{TraceError, build_itinerary};

/// Error from route planning.
///
/// "No route" is not an error: see [`RouteOutcome`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Invalid route request
    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    /// A stop in the request is not in the timetable
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// The predecessor trace is inconsistent (a search or graph bug)
    #[error("invalid path trace to {destination}: {source}")]
    CorruptTrace {
        destination: String,
        #[source]
        source: TraceError,
    },

    /// Search was cancelled
    #[error("search cancelled")]
    Cancelled,
}

/// Request for a route.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Stop to leave from.
    pub origin: Arc<Stop>,

    /// Stop to arrive at.
    pub destination: Arc<Stop>,

    /// Earliest time the passenger is at the origin.
    pub departure: ServiceTime,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(origin: Arc<Stop>, destination: Arc<Stop>, departure: ServiceTime) -> Self {
        Self {
            origin,
            destination,
            departure,
        }
    }

    /// Validate the request against a timetable.
    pub fn validate(&self, timetable: &Timetable) -> Result<(), PlanError> {
        for stop in [&self.origin, &self.destination] {
            if timetable.stops().get(stop.name()).is_none() {
                return Err(PlanError::UnknownStop(stop.name().to_string()));
            }
        }

        if self.origin == self.destination {
            return Err(PlanError::InvalidRequest(
                "origin and destination are the same stop".to_string(),
            ));
        }

        Ok(())
    }
}

/// How a route search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A route exists.
    Found(Itinerary),

    /// Nothing departs the origin within the wait tolerance.
    NoFeasibleStart,

    /// No event at the destination is reachable from the start event.
    Unreachable,
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct Plan {
    /// How the search ended.
    pub outcome: RouteOutcome,

    /// The departure event boarded at the origin, if any.
    pub start: Option<StopEvent>,

    /// Number of stop events the search settled.
    pub events_settled: usize,
}

impl Plan {
    fn without_search(outcome: RouteOutcome) -> Self {
        Self {
            outcome,
            start: None,
            events_settled: 0,
        }
    }

    /// The itinerary, empty when no route was found.
    pub fn itinerary(&self) -> Itinerary {
        match &self.outcome {
            RouteOutcome::Found(itinerary) => itinerary.clone(),
            _ => Itinerary::empty(),
        }
    }

    /// Consume the plan, returning the itinerary (empty when no route).
    pub fn into_itinerary(self) -> Itinerary {
        match self.outcome {
            RouteOutcome::Found(itinerary) => itinerary,
            _ => Itinerary::empty(),
        }
    }
}

/// Route planner over one timetable.
///
/// Holds no search state: every call builds its own and drops it before
/// returning, so one planner may serve concurrent callers.
pub struct Planner<'a> {
    timetable: &'a Timetable,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(timetable: &'a Timetable, config: &'a PlannerConfig) -> Self {
        Self { timetable, config }
    }

    /// Find stops whose name contains `pattern`, ignoring case.
    pub fn find_stops_by_substring(&self, pattern: &str) -> Vec<Arc<Stop>> {
        self.timetable.stops().find_by_substring(pattern)
    }

    /// Compute the fastest itinerary from `origin` to `destination`.
    ///
    /// Returns an empty itinerary if nothing departs within the wait
    /// tolerance or the destination can't be reached. Use [`Planner::plan`]
    /// to tell those cases apart.
    pub fn compute_route(
        &self,
        origin: &Stop,
        destination: &Stop,
        departure: ServiceTime,
    ) -> Result<Itinerary, PlanError> {
        let request = RouteRequest::new(
            self.resolve(origin)?,
            self.resolve(destination)?,
            departure,
        );
        Ok(self.plan(&request)?.into_itinerary())
    }

    /// Search for a route.
    pub fn plan(&self, request: &RouteRequest) -> Result<Plan, PlanError> {
        self.plan_with_cancel(request, &CancelToken::new())
    }

    /// Search for a route, stopping early if `cancel` is raised.
    pub fn plan_with_cancel(
        &self,
        request: &RouteRequest,
        cancel: &CancelToken,
    ) -> Result<Plan, PlanError> {
        request.validate(self.timetable)?;

        let Some(start) = self.timetable.events().feasible_start(
            &request.origin,
            request.departure,
            self.config.max_wait_secs,
        ) else {
            debug!(
                origin = %request.origin,
                departure = %request.departure,
                max_wait_mins = self.config.max_wait().num_minutes(),
                "no departure within max wait"
            );
            return Ok(Plan::without_search(RouteOutcome::NoFeasibleStart));
        };

        let graph = self.timetable.graph();
        let paths =
            shortest_paths(graph, start, cancel).map_err(|_| PlanError::Cancelled)?;

        let Some(arrival) = best_arrival(&paths, &request.destination) else {
            debug!(
                origin = %request.origin,
                destination = %request.destination,
                start = %start,
                settled = paths.settled_count(),
                "destination unreachable"
            );
            return Ok(Plan {
                outcome: RouteOutcome::Unreachable,
                start: Some(start.clone()),
                events_settled: paths.settled_count(),
            });
        };

        let itinerary =
            build_itinerary(&paths, arrival, graph.vertex_count()).map_err(|source| {
                error!(destination = %arrival, error = %source, "corrupt path trace");
                PlanError::CorruptTrace {
                    destination: arrival.to_string(),
                    source,
                }
            })?;

        debug!(
            start = %start,
            arrival = %arrival,
            segments = itinerary.len(),
            settled = paths.settled_count(),
            "route found"
        );

        Ok(Plan {
            outcome: RouteOutcome::Found(itinerary),
            start: Some(start.clone()),
            events_settled: paths.settled_count(),
        })
    }

    /// Map a caller-supplied stop to the timetable's shared handle.
    fn resolve(&self, stop: &Stop) -> Result<Arc<Stop>, PlanError> {
        self.timetable
            .stops()
            .get(stop.name())
            .cloned()
            .ok_or_else(|| PlanError::UnknownStop(stop.name().to_string()))
    }
}

/// The reachable event at `destination` with the smallest distance,
/// earliest arrival first on ties.
fn best_arrival<'p>(
    paths: &'p ShortestPaths<StopEvent>,
    destination: &Stop,
) -> Option<&'p StopEvent> {
    paths
        .reachable()
        .filter(|(event, _)| &**event.stop() == destination)
        .min_by_key(|(event, distance)| (*distance, event.time()))
        .map(|(event, _)| event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleData;

    fn timetable() -> Timetable {
        let data = ScheduleData::from_json(
            r#"{
                "stops": [
                    {"name": "A", "latitude": 0, "longitude": 0},
                    {"name": "B", "latitude": 0, "longitude": 0}
                ],
                "trips": [{"id": "t1", "calls": [
                    {"stop": "A", "departure": "00:00:00"},
                    {"stop": "B", "arrival": "00:05:00"}
                ]}]
            }"#,
        )
        .unwrap();
        Timetable::from_schedule(&data).unwrap()
    }

    fn stop(name: &str) -> Arc<Stop> {
        Arc::new(Stop::new(name, 0.0, 0.0).unwrap())
    }

    #[test]
    fn validate_accepts_known_stops() {
        let tt = timetable();
        let req = RouteRequest::new(stop("A"), stop("B"), ServiceTime::MIDNIGHT);
        assert!(req.validate(&tt).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_stop() {
        let tt = timetable();
        let req = RouteRequest::new(stop("A"), stop("Z"), ServiceTime::MIDNIGHT);
        assert!(matches!(req.validate(&tt), Err(PlanError::UnknownStop(name)) if name == "Z"));
    }

    #[test]
    fn validate_rejects_same_stop() {
        let tt = timetable();
        let req = RouteRequest::new(stop("A"), stop("A"), ServiceTime::MIDNIGHT);
        assert!(matches!(req.validate(&tt), Err(PlanError::InvalidRequest(_))));
    }

    #[test]
    fn plan_itinerary_for_each_outcome() {
        let plan = Plan::without_search(RouteOutcome::Unreachable);
        assert!(plan.itinerary().is_empty());
        assert!(plan.start.is_none());
        assert_eq!(plan.events_settled, 0);
    }

    #[test]
    fn error_display() {
        let err = PlanError::UnknownStop("Z".into());
        assert_eq!(err.to_string(), "unknown stop: Z");

        let err = PlanError::CorruptTrace {
            destination: "B (00:05:00)".into(),
            source: TraceError::TooLong { limit: 3 },
        };
        assert_eq!(
            err.to_string(),
            "invalid path trace to B (00:05:00): trace exceeded 3 steps without reaching the start event"
        );
    }
}
