//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::planner::PlannerConfig;
use crate::schedule::ScheduleHandle;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current timetable, reloadable while serving
    pub schedule: ScheduleHandle,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,

    /// Longest a single route search may run
    pub search_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(schedule: ScheduleHandle, config: PlannerConfig, search_timeout: Duration) -> Self {
        Self {
            schedule,
            config: Arc::new(config),
            search_timeout,
        }
    }
}
