//! Stop registry and name lookup.
//!
//! Holds every physical stop of a schedule, keyed by name, and answers the
//! exact and substring lookups used to resolve user input into stops.

mod registry;

pub use registry::{DuplicateStop, StopRegistry};
