//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::{exercises, notifications, sessions, settings, stats, system, timers};

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(system::health_handler))
        .route("/api/", get(system::root_handler))
        .route("/api/status", get(system::status_handler))
        // Timers
        .route("/api/timers", get(timers::timers_handler))
        .route("/api/timers/start-all", post(timers::start_all_handler))
        .route("/api/timers/pause-all", post(timers::pause_all_handler))
        .route("/api/timers/:kind/start", post(timers::start_handler))
        .route("/api/timers/:kind/pause", post(timers::pause_handler))
        .route("/api/timers/:kind/reset", post(timers::reset_handler))
        // Settings
        .route(
            "/api/user/settings",
            get(settings::get_settings_handler).put(settings::update_settings_handler),
        )
        .route("/api/user/profile", get(settings::profile_handler))
        // Notifications
        .route(
            "/api/notifications",
            get(notifications::list_handler).post(notifications::create_handler),
        )
        .route(
            "/api/notifications/recent",
            get(notifications::recent_handler).delete(notifications::clear_recent_handler),
        )
        .route(
            "/api/notifications/permission",
            get(notifications::permission_handler)
                .post(notifications::request_permission_handler),
        )
        .route("/api/notifications/clear", delete(notifications::clear_handler))
        .route("/api/notifications/:id/read", put(notifications::mark_read_handler))
        // Sessions
        .route(
            "/api/sessions",
            get(sessions::history_handler).post(sessions::today_handler),
        )
        .route("/api/sessions/today", get(sessions::today_handler))
        .route("/api/sessions/:id", put(sessions::update_handler))
        .route("/api/sessions/:id/activity", post(sessions::activity_handler))
        // Stats
        .route("/api/stats/dashboard", get(stats::dashboard_handler))
        .route("/api/stats/weekly", get(stats::weekly_handler))
        .route("/api/stats/monthly", get(stats::monthly_handler))
        .route("/api/stats/trends", get(stats::trends_handler))
        // Exercises
        .route("/api/exercises", get(exercises::list_handler))
        .route("/api/exercises/:category", get(exercises::category_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
