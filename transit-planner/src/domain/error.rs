//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from schedule loading and planning errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Invalid segment construction (e.g., end before start)
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),

    /// Consecutive segments don't share an event
    #[error("segments are not contiguous: {end} is followed by {start}")]
    SegmentsNotContiguous { end: String, start: String },
}
