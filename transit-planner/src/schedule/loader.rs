//! Schedule document types.
//!
//! A schedule is a JSON document listing stops and trips. Each trip is the
//! ordered list of calls one vehicle makes. Times are "HH:MM:SS" strings
//! relative to the start of the service day.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

/// A stop as it appears in the schedule document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One call of a trip at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Stop name, matching a `StopRecord`
    pub stop: String,

    /// Arrival time (absent at the origin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,

    /// Departure time (absent at the terminus)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
}

/// A vehicle trip: an id and its calls in travel order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub calls: Vec<CallRecord>,
}

/// A complete schedule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

impl ScheduleData {
    /// Parse a schedule document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a schedule document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
