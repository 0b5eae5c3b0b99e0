use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_planner::schedule::ScheduleHandle;
use transit_planner::web::{AppState, ServerConfig, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        error!(error = %e, "invalid configuration");
        std::process::exit(2);
    });

    // Load the schedule (fail fast if unavailable)
    let schedule = ScheduleHandle::load(&config.schedule_path).unwrap_or_else(|e| {
        error!(path = %config.schedule_path.display(), error = %e, "failed to load schedule");
        std::process::exit(1);
    });
    let timetable = schedule.snapshot().await;
    info!(
        path = %config.schedule_path.display(),
        stops = timetable.stops().len(),
        trips = timetable.trip_count(),
        events = timetable.event_count(),
        "loaded schedule"
    );
    drop(timetable);

    // Spawn background task to reload the schedule periodically
    if let Some(every) = config.reload_interval {
        let schedule_refresh = schedule.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match schedule_refresh.reload().await {
                    Ok(timetable) => {
                        info!(events = timetable.event_count(), "reloaded schedule")
                    }
                    Err(e) => error!(error = %e, "failed to reload schedule"),
                }
            }
        });
    }

    let state = AppState::new(schedule, config.planner.clone(), config.search_timeout);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .unwrap_or_else(|e| {
            error!(addr = %config.bind, error = %e, "failed to bind");
            std::process::exit(1);
        });
    info!(addr = %config.bind, "transit planner listening");
    info!("  GET  /health           - Health check");
    info!("  GET  /stops/search     - Search stops by name");
    info!("  POST /route/plan       - Plan a route");
    info!("  POST /schedule/reload  - Reload the schedule file");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
