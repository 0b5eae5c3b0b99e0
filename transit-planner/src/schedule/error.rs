//! Schedule loading error types.

use std::path::PathBuf;

use crate::domain::{InvalidStop, TimeError};
use crate::stops::DuplicateStop;

/// Errors that can occur while loading or building a schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Reading the schedule file failed
    #[error("failed to read schedule {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse schedule JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop record is invalid
    #[error("stop {name}: {source}")]
    InvalidStop {
        name: String,
        #[source]
        source: InvalidStop,
    },

    /// Two stops share a name
    #[error(transparent)]
    DuplicateStop(#[from] DuplicateStop),

    /// Two trips share an id
    #[error("duplicate trip id: {0}")]
    DuplicateTrip(String),

    /// A call references a stop that isn't registered
    #[error("trip {trip} calls at unknown stop {stop}")]
    UnknownStop { trip: String, stop: String },

    /// A call time could not be parsed
    #[error("trip {trip} at {stop}: {source}")]
    InvalidTime {
        trip: String,
        stop: String,
        #[source]
        source: TimeError,
    },

    /// A trip needs at least an origin and a terminus
    #[error("trip {0} must have at least two calls")]
    TooFewCalls(String),

    /// A call lacks the time it needs
    #[error("trip {trip} at {stop}: missing {side} time")]
    MissingTime {
        trip: String,
        stop: String,
        side: &'static str,
    },

    /// A trip calls at the same stop twice in a row
    #[error("trip {trip} calls at {stop} twice in a row")]
    RepeatedStop { trip: String, stop: String },

    /// Times go backwards along a trip
    #[error("trip {trip} goes back in time at {stop}")]
    NonMonotonic { trip: String, stop: String },

    /// The blocking load task panicked or was cancelled
    #[error("schedule load task failed: {0}")]
    LoadTask(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScheduleError::UnknownStop {
            trip: "t1".into(),
            stop: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "trip t1 calls at unknown stop Nowhere");

        let err = ScheduleError::TooFewCalls("t2".into());
        assert_eq!(err.to_string(), "trip t2 must have at least two calls");

        let err = ScheduleError::MissingTime {
            trip: "t3".into(),
            stop: "A".into(),
            side: "departure",
        };
        assert_eq!(err.to_string(), "trip t3 at A: missing departure time");

        let err = ScheduleError::from(DuplicateStop("A".into()));
        assert_eq!(err.to_string(), "duplicate stop name: A");
    }

    #[tokio::test]
    async fn load_task_failure_display() {
        let task: tokio::task::JoinHandle<()> = tokio::spawn(async { panic!("boom") });
        let join_error = task.await.unwrap_err();
        let err = ScheduleError::from(join_error);
        assert!(err.to_string().starts_with("schedule load task failed: "));
        assert!(matches!(err, ScheduleError::LoadTask(e) if e.is_panic()));
    }
}
