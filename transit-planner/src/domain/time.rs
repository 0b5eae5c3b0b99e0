//! Service-day time handling.
//!
//! Schedules express times as "HH:MM:SS" (or "HH:MM") relative to the start
//! of the service day. Hours may exceed 23 for vehicles running past
//! midnight, so a time is stored as plain seconds rather than a wall-clock
//! value.

use std::fmt;

/// Error returned when parsing or building an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Latest representable service time (99:59:59).
const MAX_SECS: u32 = 99 * 3600 + 59 * 60 + 59;

/// A point in time within a service day, in seconds since its start.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::ServiceTime;
///
/// let t = ServiceTime::parse("08:15:30").unwrap();
/// assert_eq!(t.as_secs(), 8 * 3600 + 15 * 60 + 30);
/// assert_eq!(t.to_string(), "08:15:30");
///
/// // After-midnight running is allowed
/// assert!(ServiceTime::parse("25:10").is_ok());
///
/// // Malformed input is rejected
/// assert!(ServiceTime::parse("8:15").is_err());
/// assert!(ServiceTime::parse("08:61").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Start of the service day.
    pub const MIDNIGHT: ServiceTime = ServiceTime(0);

    /// Create a time from seconds since the start of the service day.
    pub fn from_secs(secs: u32) -> Result<Self, TimeError> {
        if secs > MAX_SECS {
            return Err(TimeError::new("must not exceed 99:59:59"));
        }
        Ok(Self(secs))
    }

    /// Create a time from a signed second count, as supplied by callers.
    pub fn from_signed_secs(secs: i64) -> Result<Self, TimeError> {
        let secs = u32::try_from(secs).map_err(|_| TimeError::new("must be non-negative"))?;
        Self::from_secs(secs)
    }

    /// Parse "HH:MM:SS" or "HH:MM".
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }
        if bytes[2] != b':' || (bytes.len() == 8 && bytes[5] != b':') {
            return Err(TimeError::new("expected ':' separators"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
            second
        } else {
            0
        };

        Ok(Self(hour * 3600 + minute * 60 + second))
    }

    /// Seconds since the start of the service day.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns the hour component (may exceed 23).
    pub fn hour(&self) -> u32 {
        self.0 / 3600
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u32 {
        (self.0 / 60) % 60
    }

    /// Returns the second component (0-59).
    pub fn second(&self) -> u32 {
        self.0 % 60
    }

    /// Seconds from `earlier` to `self`, or `None` if `earlier` is later.
    pub fn secs_since(&self, earlier: Self) -> Option<u32> {
        self.0.checked_sub(earlier.0)
    }

    /// Absolute gap between two times, in seconds.
    pub fn abs_diff(&self, other: Self) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
