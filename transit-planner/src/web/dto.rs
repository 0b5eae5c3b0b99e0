//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ServiceTime, Stop, StopEvent, TimeError, TripSegment};
use crate::planner::{Plan, RouteOutcome};

/// Query for stop search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Substring to look for in stop names
    #[serde(default)]
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A stop in search results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    /// Matching stops, in timetable order
    pub stops: Vec<StopResult>,
}

/// Departure time as sent by clients: seconds since the start of the
/// service day, or a clock string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DepartureTime {
    /// Seconds since the start of the service day
    Seconds(i64),

    /// "HH:MM" or "HH:MM:SS"
    Clock(String),
}

impl DepartureTime {
    /// Convert to a service time.
    pub fn to_service_time(&self) -> Result<ServiceTime, TimeError> {
        match self {
            DepartureTime::Seconds(secs) => ServiceTime::from_signed_secs(*secs),
            DepartureTime::Clock(text) => ServiceTime::parse(text),
        }
    }
}

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Origin stop name
    pub origin: String,

    /// Destination stop name
    pub destination: String,

    /// Earliest departure from the origin
    pub departure: DepartureTime,
}

/// One segment of a planned route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// "ride" or "wait"
    pub kind: &'static str,

    /// Stop the segment starts at
    pub from: String,

    /// Stop the segment ends at
    pub to: String,

    /// Start time, "HH:MM:SS"
    pub depart: String,

    /// End time, "HH:MM:SS"
    pub arrive: String,

    pub duration_secs: u32,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// "found", "no_feasible_start" or "unreachable"
    pub status: &'static str,

    pub origin: String,

    pub destination: String,

    /// Departure event boarded at the origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boarded: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,

    /// Zero when no route was found
    pub duration_secs: u32,

    /// Total duration in whole minutes
    pub duration_mins: i64,

    /// Route segments in travel order (empty when no route)
    pub segments: Vec<SegmentResult>,

    /// Number of stop events the search settled
    pub events_settled: usize,
}

/// Response for a schedule reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Stop events in the timetable now being served
    pub events: usize,

    pub stops: usize,

    pub trips: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            name: stop.name().to_string(),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
        }
    }
}

impl SegmentResult {
    /// Create from a domain TripSegment.
    pub fn from_segment(segment: &TripSegment) -> Self {
        Self {
            kind: segment.kind().as_str(),
            from: segment.start().stop().name().to_string(),
            to: segment.end().stop().name().to_string(),
            depart: segment.start().time().to_string(),
            arrive: segment.end().time().to_string(),
            duration_secs: segment.duration_secs(),
        }
    }
}

impl PlanRouteResponse {
    /// Create from a planner result.
    pub fn from_plan(origin: &Stop, destination: &Stop, plan: &Plan) -> Self {
        let itinerary = plan.itinerary();
        Self {
            status: status(&plan.outcome),
            origin: origin.name().to_string(),
            destination: destination.name().to_string(),
            boarded: plan.start.as_ref().map(StopEvent::to_string),
            departure_time: itinerary.departure_time().map(|t| t.to_string()),
            arrival_time: itinerary.arrival_time().map(|t| t.to_string()),
            duration_secs: itinerary.total_secs(),
            duration_mins: itinerary.total_duration().num_minutes(),
            segments: itinerary
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
            events_settled: plan.events_settled,
        }
    }
}

fn status(outcome: &RouteOutcome) -> &'static str {
    match outcome {
        RouteOutcome::Found(_) => "found",
        RouteOutcome::NoFeasibleStart => "no_feasible_start",
        RouteOutcome::Unreachable => "unreachable",
    }
}
