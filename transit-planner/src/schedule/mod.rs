//! Schedule data: loading, graph construction, and the departure index.
//!
//! A schedule document is parsed into [`ScheduleData`], turned into a
//! [`Timetable`] by [`TimetableBuilder`], and served to planners through a
//! [`ScheduleHandle`] that can be reloaded while requests are in flight.

mod builder;
mod error;
mod events;
mod handle;
mod loader;
mod timetable;

pub use builder::TimetableBuilder;
pub use error::ScheduleError;
pub use events::EventStore;
pub use handle::ScheduleHandle;
pub use loader::{CallRecord, ScheduleData, StopRecord, TripRecord};
pub use timetable::Timetable;
