//! Statistics endpoints

use std::sync::Arc;

use axum::extract::State;
use chrono::{Duration, Local};

use crate::{
    api::responses::{ApiResponse, ApiResult},
    services::{
        stats::{self, PeriodSummary, Trends},
        DashboardStats,
    },
    state::AppState,
};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;
const TREND_DAYS: i64 = 14;

/// Handle GET /api/stats/dashboard
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> ApiResult<DashboardStats> {
    Ok(ApiResponse::ok(state.services.sessions.dashboard_stats().await))
}

async fn summary(state: &AppState, days: i64, with_best_day: bool) -> PeriodSummary {
    let today = Local::now().date_naive();
    let start = today - Duration::days(days);
    let sessions = state.services.sessions.sessions_between(start, today).await;
    stats::period_summary(&sessions, start, today, with_best_day)
}

/// Handle GET /api/stats/weekly
pub async fn weekly_handler(State(state): State<Arc<AppState>>) -> ApiResult<PeriodSummary> {
    Ok(ApiResponse::ok(summary(&state, WEEK_DAYS, false).await))
}

/// Handle GET /api/stats/monthly
pub async fn monthly_handler(State(state): State<Arc<AppState>>) -> ApiResult<PeriodSummary> {
    Ok(ApiResponse::ok(summary(&state, MONTH_DAYS, true).await))
}

/// Handle GET /api/stats/trends
pub async fn trends_handler(State(state): State<Arc<AppState>>) -> ApiResult<Trends> {
    let today = Local::now().date_naive();
    let start = today - Duration::days(TREND_DAYS);
    let sessions = state.services.sessions.sessions_between(start, today).await;
    Ok(ApiResponse::ok(stats::trends(&sessions, today, TREND_DAYS)))
}
