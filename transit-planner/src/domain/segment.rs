//! Trip segment type.
//!
//! A `TripSegment` is one leg of an itinerary: either riding a vehicle
//! between two stops or waiting at one stop for a later departure.

use super::{DomainError, StopEvent};

/// Whether a segment is spent on a vehicle or standing at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Travel aboard a vehicle between two different stops.
    Ride,
    /// Idle time at one stop between two events.
    Wait,
}

impl SegmentKind {
    /// Stable lowercase name, used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Ride => "ride",
            SegmentKind::Wait => "wait",
        }
    }
}

/// A segment of an itinerary.
///
/// # Invariants
///
/// - `end` is not earlier than `start`
/// - `kind` is `Wait` exactly when both events share a stop
/// - `duration_secs` is the time between `start` and `end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSegment {
    kind: SegmentKind,
    start: StopEvent,
    end: StopEvent,
    duration_secs: u32,
}

impl TripSegment {
    /// Build the segment joining two consecutive events of a path.
    ///
    /// The kind is derived from the events: same stop means a wait,
    /// different stops mean a ride.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `end` is earlier than `start`, or if both events are
    /// identical.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transit_planner::domain::{SegmentKind, ServiceTime, Stop, StopEvent, TripSegment};
    ///
    /// let a = Arc::new(Stop::new("A", 0.0, 0.0).unwrap());
    /// let b = Arc::new(Stop::new("B", 0.0, 0.0).unwrap());
    /// let dep = StopEvent::new(a, ServiceTime::parse("10:00").unwrap());
    /// let arr = StopEvent::new(b, ServiceTime::parse("10:05").unwrap());
    ///
    /// let segment = TripSegment::between(dep, arr).unwrap();
    /// assert_eq!(segment.kind(), SegmentKind::Ride);
    /// assert_eq!(segment.duration_secs(), 300);
    /// ```
    pub fn between(start: StopEvent, end: StopEvent) -> Result<Self, DomainError> {
        if start == end {
            return Err(DomainError::InvalidSegment("start and end are the same event"));
        }
        let duration_secs = end
            .time()
            .secs_since(start.time())
            .ok_or(DomainError::InvalidSegment("end must not be before start"))?;
        let kind = if start.same_stop(&end) {
            SegmentKind::Wait
        } else {
            SegmentKind::Ride
        };

        Ok(Self {
            kind,
            start,
            end,
            duration_secs,
        })
    }

    /// Returns the segment kind.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the event the segment starts at.
    pub fn start(&self) -> &StopEvent {
        &self.start
    }

    /// Returns the event the segment ends at.
    pub fn end(&self) -> &StopEvent {
        &self.end
    }

    /// Returns the elapsed time in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Returns true if this is a ride segment.
    pub fn is_ride(&self) -> bool {
        self.kind == SegmentKind::Ride
    }

    /// Returns true if this is a wait segment.
    pub fn is_wait(&self) -> bool {
        self.kind == SegmentKind::Wait
    }
}
