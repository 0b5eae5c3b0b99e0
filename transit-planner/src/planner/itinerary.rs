//! Itinerary reconstruction from a shortest-path trace.

use crate::domain::{DomainError, Itinerary, StopEvent, TripSegment};

use super::dijkstra::ShortestPaths;

/// Why a predecessor trace could not be turned into an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// The chain stops before reaching the start event
    #[error("trace breaks off at {at} before reaching the start event")]
    Broken { at: String },

    /// The chain is longer than the graph has vertices (a cycle)
    #[error("trace exceeded {limit} steps without reaching the start event")]
    TooLong { limit: usize },

    /// A link of the chain is not a valid segment
    #[error("invalid link in trace: {0}")]
    Segment(#[from] DomainError),
}

/// Walk predecessors back from `destination` to the search source and emit
/// the segments in travel order.
///
/// At most `step_limit` links are followed; a valid trace never has more
/// links than the graph has vertices.
pub fn build_itinerary(
    paths: &ShortestPaths<StopEvent>,
    destination: &StopEvent,
    step_limit: usize,
) -> Result<Itinerary, TraceError> {
    let start = paths.source();
    let mut segments = Vec::new();
    let mut current = destination;

    while current != start {
        if segments.len() >= step_limit {
            return Err(TraceError::TooLong { limit: step_limit });
        }
        let previous = paths.predecessor(current).ok_or_else(|| TraceError::Broken {
            at: current.to_string(),
        })?;
        segments.push(TripSegment::between(previous.clone(), current.clone())?);
        current = previous;
    }

    segments.reverse();
    Ok(Itinerary::new(segments)?)
}
