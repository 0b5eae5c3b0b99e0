//! Server configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::PlannerConfig;

/// Schedule file to serve (required).
pub const SCHEDULE_VAR: &str = "PLANNER_SCHEDULE";
/// Wait tolerance at the origin, in seconds.
pub const MAX_WAIT_VAR: &str = "PLANNER_MAX_WAIT_SECS";
/// Listen address.
pub const BIND_VAR: &str = "PLANNER_BIND";
/// Per-request search timeout, in milliseconds.
pub const SEARCH_TIMEOUT_VAR: &str = "PLANNER_SEARCH_TIMEOUT_MS";
/// Interval between schedule reloads, in seconds; 0 disables.
pub const RELOAD_VAR: &str = "PLANNER_RELOAD_SECS";

/// Error reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Path of the schedule document
    pub schedule_path: PathBuf,

    /// Address to listen on
    pub bind: SocketAddr,

    /// Longest a single route search may run
    pub search_timeout: Duration,

    /// How often to reload the schedule file (None = never)
    pub reload_interval: Option<Duration>,

    /// Route planner settings
    pub planner: PlannerConfig,
}

impl ServerConfig {
    /// Default listen address.
    pub const DEFAULT_BIND: SocketAddr =
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

    /// Default search timeout.
    pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_millis(5000);

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let schedule_path = lookup(SCHEDULE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(SCHEDULE_VAR))?;

        let bind = parse_or(&lookup, BIND_VAR, || Self::DEFAULT_BIND)?;

        let search_timeout = parse_or(&lookup, SEARCH_TIMEOUT_VAR, || {
            Self::DEFAULT_SEARCH_TIMEOUT.as_millis() as u64
        })
        .map(Duration::from_millis)?;
        if search_timeout.is_zero() {
            return Err(invalid(SEARCH_TIMEOUT_VAR, "0"));
        }

        let reload_secs: u64 = parse_or(&lookup, RELOAD_VAR, || 0)?;
        let reload_interval = (reload_secs > 0).then(|| Duration::from_secs(reload_secs));

        let defaults = PlannerConfig::default();
        let max_wait_secs = parse_or(&lookup, MAX_WAIT_VAR, || defaults.max_wait_secs)?;

        Ok(Self {
            schedule_path,
            bind,
            search_timeout,
            reload_interval,
            planner: PlannerConfig::new(max_wait_secs),
        })
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
    }
}

/// Parse `var` if set, otherwise use `default`.
fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.trim().parse().map_err(|_| invalid(var, &value)),
        None => Ok(default()),
    }
}
