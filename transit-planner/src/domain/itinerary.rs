//! Itinerary type.
//!
//! An `Itinerary` is the complete answer to a route query: rides and waits
//! in chronological order from the start event to the arrival event.

use chrono::Duration;

use super::{DomainError, ServiceTime, StopEvent, TripSegment};

/// A chronological sequence of trip segments.
///
/// # Invariants
///
/// - Consecutive segments are time-contiguous: the end event of one segment
///   is the start event of the next
/// - An empty itinerary means no route was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Itinerary {
    segments: Vec<TripSegment>,
}

impl Itinerary {
    /// Constructs an itinerary, checking that segments are contiguous.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any segment does not start where its predecessor ends.
    pub fn new(segments: Vec<TripSegment>) -> Result<Self, DomainError> {
        for pair in segments.windows(2) {
            if pair[0].end() != pair[1].start() {
                return Err(DomainError::SegmentsNotContiguous {
                    end: pair[0].end().to_string(),
                    start: pair[1].start().to_string(),
                });
            }
        }
        Ok(Self { segments })
    }

    /// The itinerary returned when no route exists.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the segments in chronological order.
    pub fn segments(&self) -> &[TripSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the first event, if any.
    pub fn origin(&self) -> Option<&StopEvent> {
        self.segments.first().map(TripSegment::start)
    }

    /// Returns the final event, if any.
    pub fn destination(&self) -> Option<&StopEvent> {
        self.segments.last().map(TripSegment::end)
    }

    /// Returns the departure time, if any.
    pub fn departure_time(&self) -> Option<ServiceTime> {
        self.origin().map(StopEvent::time)
    }

    /// Returns the arrival time, if any.
    pub fn arrival_time(&self) -> Option<ServiceTime> {
        self.destination().map(StopEvent::time)
    }

    /// Total elapsed seconds across all segments.
    pub fn total_secs(&self) -> u32 {
        self.segments.iter().map(TripSegment::duration_secs).sum()
    }

    /// Total elapsed time across all segments.
    pub fn total_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.total_secs()))
    }

    /// Number of ride segments.
    pub fn ride_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_ride()).count()
    }

    /// Number of wait segments.
    pub fn wait_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_wait()).count()
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a TripSegment;
    type IntoIter = std::slice::Iter<'a, TripSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
