//! Transit itinerary planner.
//!
//! Loads a stop-and-trip schedule into a time-expanded graph and answers:
//! "If I'm at this stop at this time, what is the fastest way to reach
//! that stop?"

pub mod domain;
pub mod graph;
pub mod planner;
pub mod schedule;
pub mod stops;
pub mod web;
