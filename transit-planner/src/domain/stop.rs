//! Physical stop type.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Error returned when constructing an invalid stop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop: {reason}")]
pub struct InvalidStop {
    reason: &'static str,
}

/// A physical location where vehicles call.
///
/// The name is the stop's identity: two stops with the same name are equal
/// and hash identically, whatever their coordinates.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::Stop;
///
/// let a = Stop::new("Central", 51.5, -0.12).unwrap();
/// let b = Stop::new("Central", 0.0, 0.0).unwrap();
/// assert_eq!(a, b);
///
/// // Blank names are rejected
/// assert!(Stop::new("  ", 0.0, 0.0).is_err());
/// ```
#[derive(Clone)]
pub struct Stop {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Stop {
    /// Create a stop, validating its name and coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, InvalidStop> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidStop {
                reason: "name must not be blank",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidStop {
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidStop {
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(Self {
            name,
            latitude,
            longitude,
        })
    }

    /// Returns the stop name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop({})", self.name)
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
