//! Itinerary planning over a time-expanded timetable.
//!
//! A route search boards the earliest departure at the origin within the
//! configured wait tolerance, runs Dijkstra from that event, and rebuilds
//! the fastest itinerary to the destination from the predecessor trace.

mod cancel;
mod config;
mod dijkstra;
mod itinerary;
mod search;


pub use cancel::CancelToken;
pub use config::PlannerConfig;
pub use dijkstra::{Cancelled, ShortestPaths, shortest_paths};
pub use itinerary::{TraceError, build_itinerary};
pub use search::{Plan, PlanError, Planner, RouteOutcome, RouteRequest};
