//! Domain types for the transit itinerary planner.
//!
//! This module contains the core domain model types: stops, service times,
//! stop events (the vertices of the time-expanded graph), and the segments
//! that make up an itinerary. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod event;
mod itinerary;
mod segment;
mod stop;
mod time;

pub use error::DomainError;
pub use event::StopEvent;
pub use itinerary::Itinerary;
pub use segment::{SegmentKind, TripSegment};
pub use stop::{InvalidStop, Stop};
pub use time::{ServiceTime, TimeError};
