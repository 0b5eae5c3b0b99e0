//! Web layer for the transit planner.
//!
//! Provides HTTP endpoints for stop lookup, route planning, and schedule
//! reloads.

mod config;
mod dto;
mod routes;
mod state;

pub use config::{ConfigError, ServerConfig};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
