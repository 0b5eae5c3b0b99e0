//! HTTP route handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::Stop;
use crate::planner::{CancelToken, Plan, PlanError, Planner, RouteRequest};
use crate::schedule::{ScheduleError, Timetable};

use super::dto::*;
use super::state::AppState;

/// Default number of stop search results.
const DEFAULT_STOP_LIMIT: usize = 10;
/// Upper bound on stop search results.
const MAX_STOP_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops/search", get(search_stops))
        .route("/route/plan", post(plan_route))
        .route("/schedule/reload", post(reload_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stops by name substring.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_STOP_LIMIT).min(MAX_STOP_LIMIT);
    let timetable = state.schedule.snapshot().await;

    let stops = timetable
        .stops()
        .find_by_substring(req.q.trim())
        .iter()
        .take(limit)
        .map(|stop| StopResult::from_stop(stop))
        .collect();

    Json(StopSearchResponse { stops })
}

/// Plan the fastest route between two stops.
///
/// The search runs on the blocking pool against a snapshot of the
/// timetable. If it outlives the configured timeout it is cancelled and
/// the request fails with 503.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>, AppError> {
    let departure = req
        .departure
        .to_service_time()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid departure: {e}"),
        })?;

    let timetable = state.schedule.snapshot().await;
    let origin = lookup_stop(&timetable, &req.origin)?;
    let destination = lookup_stop(&timetable, &req.destination)?;
    let request = RouteRequest::new(origin, destination, departure);

    let cancel = CancelToken::new();
    let search = {
        let timetable = Arc::clone(&timetable);
        let config = Arc::clone(&state.config);
        let cancel = cancel.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || {
            Planner::new(&timetable, &config).plan_with_cancel(&request, &cancel)
        })
    };

    let plan = await_search(search, state.search_timeout, &cancel).await?;

    let response = PlanRouteResponse::from_plan(&request.origin, &request.destination, &plan);
    info!(
        origin = %request.origin,
        destination = %request.destination,
        departure = %request.departure,
        status = response.status,
        settled = plan.events_settled,
        "planned route"
    );

    Ok(Json(response))
}

/// Wait for a search task, raising `cancel` if it outlives `timeout`.
async fn await_search(
    search: JoinHandle<Result<Plan, PlanError>>,
    timeout: Duration,
    cancel: &CancelToken,
) -> Result<Plan, AppError> {
    match tokio::time::timeout(timeout, search).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(join_error)) => Err(AppError::Internal {
            message: format!("Search task failed: {join_error}"),
        }),
        Err(_) => {
            cancel.cancel();
            Err(AppError::Unavailable {
                message: format!("Search timed out after {} ms", timeout.as_millis()),
            })
        }
    }
}

/// Reload the timetable from its schedule file.
async fn reload_schedule(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let timetable = state.schedule.reload().await?;
    let events = timetable.event_count();
    info!(events, "schedule reloaded");

    Ok(Json(ReloadResponse {
        events,
        stops: timetable.stops().len(),
        trips: timetable.trip_count(),
    }))
}

/// Resolve a stop name from a request against the timetable.
fn lookup_stop(timetable: &Timetable, name: &str) -> Result<Arc<Stop>, AppError> {
    timetable
        .stops()
        .get(name.trim())
        .cloned()
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown stop: {name}"),
        })
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InvalidRequest(_) => AppError::BadRequest { message },
            PlanError::UnknownStop(_) => AppError::NotFound { message },
            PlanError::Cancelled => AppError::Unavailable { message },
            PlanError::CorruptTrace { .. } => AppError::Internal { message },
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        AppError::Internal {
            message: format!("Schedule reload failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PlannerConfig;
    use crate::schedule::{ScheduleData, ScheduleHandle};
    use std::io::Write;

    const SCHEDULE: &str = r#"{
        "stops": [
            {"name": "Central", "latitude": 51.50, "longitude": -0.12},
            {"name": "Harbour", "latitude": 51.51, "longitude": -0.10},
            {"name": "Central Park", "latitude": 51.52, "longitude": -0.11},
            {"name": "Depot", "latitude": 51.53, "longitude": -0.13}
        ],
        "trips": [
            {"id": "r1", "calls": [
                {"stop": "Central", "departure": "08:00:00"},
                {"stop": "Harbour", "arrival": "08:10:00", "departure": "08:11:00"},
                {"stop": "Central Park", "arrival": "08:20:00"}
            ]}
        ]
    }"#;

    fn state_from(json: &str) -> AppState {
        let data = ScheduleData::from_json(json).unwrap();
        let timetable = Timetable::from_schedule(&data).unwrap();
        AppState::new(
            ScheduleHandle::new(timetable),
            PlannerConfig::default(),
            Duration::from_secs(5),
        )
    }

    fn plan_request(origin: &str, destination: &str, departure: DepartureTime) -> PlanRouteRequest {
        PlanRouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure,
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn search_stops_matches_substring() {
        let query = StopSearchRequest {
            q: "central".to_string(),
            limit: None,
        };
        let Json(response) = search_stops(State(state_from(SCHEDULE)), Query(query)).await;
        let names: Vec<_> = response.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Central", "Central Park"]);
    }

    #[tokio::test]
    async fn search_stops_respects_limit() {
        let query = StopSearchRequest {
            q: String::new(),
            limit: Some(2),
        };
        let Json(response) = search_stops(State(state_from(SCHEDULE)), Query(query)).await;
        assert_eq!(response.stops.len(), 2);
    }

    #[tokio::test]
    async fn plan_route_finds_ride_and_dwell() {
        let req = plan_request(
            "Central",
            "Central Park",
            DepartureTime::Clock("07:45".to_string()),
        );
        let Json(response) = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap();

        assert_eq!(response.status, "found");
        assert_eq!(response.departure_time.as_deref(), Some("08:00:00"));
        assert_eq!(response.arrival_time.as_deref(), Some("08:20:00"));
        let kinds: Vec<_> = response.segments.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec!["ride", "wait", "ride"]);
        assert_eq!(response.duration_secs, 20 * 60);
    }

    #[tokio::test]
    async fn plan_route_reports_no_feasible_start() {
        // Default tolerance is 30 minutes; the only departure is at 08:00.
        let req = plan_request("Central", "Harbour", DepartureTime::Seconds(7 * 3600));
        let Json(response) = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap();
        assert_eq!(response.status, "no_feasible_start");
        assert!(response.segments.is_empty());
    }

    #[tokio::test]
    async fn plan_route_reports_unreachable() {
        let req = plan_request("Central", "Depot", DepartureTime::Clock("08:00".to_string()));
        let Json(response) = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap();
        assert_eq!(response.status, "unreachable");
        assert!(response.segments.is_empty());
    }

    #[tokio::test]
    async fn plan_route_rejects_unknown_stop() {
        let req = plan_request("Central", "Nowhere", DepartureTime::Seconds(0));
        let err = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn plan_route_rejects_bad_departure() {
        let req = plan_request("Central", "Harbour", DepartureTime::Clock("noon".to_string()));
        let err = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plan_route_rejects_same_stop() {
        let req = plan_request("Central", "Central", DepartureTime::Seconds(0));
        let err = plan_route(State(state_from(SCHEDULE)), Json(req))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn reload_picks_up_file_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SCHEDULE}").unwrap();
        file.flush().unwrap();

        let state = AppState::new(
            ScheduleHandle::load(file.path()).unwrap(),
            PlannerConfig::default(),
            Duration::from_secs(5),
        );
        let Json(before) = reload_schedule(State(state.clone())).await.unwrap();
        assert_eq!(before.trips, 1);

        let grown = SCHEDULE.replace(
            r#""trips": ["#,
            r#""trips": [
            {"id": "r2", "calls": [
                {"stop": "Harbour", "departure": "09:00:00"},
                {"stop": "Depot", "arrival": "09:15:00"}
            ]},"#,
        );
        std::fs::write(file.path(), grown).unwrap();

        let Json(after) = reload_schedule(State(state.clone())).await.unwrap();
        assert_eq!(after.trips, 2);
        assert_eq!(after.stops, 4);
        assert!(after.events > before.events);

        let current = state.schedule.snapshot().await;
        assert_eq!(after.events, current.event_count());
        assert_eq!(after.trips, current.trip_count());
    }

    #[tokio::test]
    async fn failed_reload_is_internal_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SCHEDULE}").unwrap();
        file.flush().unwrap();

        let state = AppState::new(
            ScheduleHandle::load(file.path()).unwrap(),
            PlannerConfig::default(),
            Duration::from_secs(5),
        );
        std::fs::write(file.path(), "not json").unwrap();

        let err = reload_schedule(State(state.clone())).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(state.schedule.snapshot().await.trip_count(), 1);
    }

    #[tokio::test]
    async fn slow_search_is_cancelled_and_unavailable() {
        let cancel = CancelToken::new();
        let search = {
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                let deadline = std::time::Instant::now() + Duration::from_secs(5);
                while !cancel.is_cancelled() && std::time::Instant::now() < deadline {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(PlanError::Cancelled)
            })
        };

        let err = await_search(search, Duration::from_millis(10), &cancel)
            .await
            .unwrap_err();

        assert!(cancel.is_cancelled());
        assert!(matches!(&err, AppError::Unavailable { message } if message.contains("10 ms")));
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn finished_search_is_returned() {
        let cancel = CancelToken::new();
        let search = tokio::task::spawn_blocking(|| Err(PlanError::UnknownStop("Z".into())));

        let err = await_search(search, Duration::from_secs(5), &cancel)
            .await
            .unwrap_err();

        assert!(!cancel.is_cancelled());
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn plan_errors_map_to_status_codes() {
        let cases = [
            (PlanError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (PlanError::UnknownStop("x".into()), StatusCode::NOT_FOUND),
            (PlanError::Cancelled, StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
