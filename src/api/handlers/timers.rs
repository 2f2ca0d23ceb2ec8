//! Timer control endpoints

use std::sync::Arc;

use axum::extract::{Path, State};

use crate::{
    api::responses::{ApiError, ApiResponse, ApiResult, ErrorCode, TimersResponse},
    engine::TimerKind,
    state::{AppState, TimerBoard},
};

fn parse_kind(kind: &str) -> Result<TimerKind, ApiError> {
    kind.parse::<TimerKind>()
        .map_err(ApiError::not_found)
        .error_code("TIMER_NOT_FOUND")
}

fn respond(
    result: Result<Arc<TimerBoard>, String>,
    message: String,
) -> ApiResult<TimersResponse> {
    let board = result
        .map_err(ApiError::internal)
        .error_code("TIMER_UPDATE_ERROR")?;
    Ok(ApiResponse::with_message(TimersResponse::new(&board), message))
}

/// Handle GET /api/timers
pub async fn timers_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    let board = state
        .get_timers()
        .map_err(ApiError::internal)
        .error_code("TIMERS_FETCH_ERROR")?;
    Ok(ApiResponse::ok(TimersResponse::new(&board)))
}

/// Handle POST /api/timers/:kind/start
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<TimersResponse> {
    let kind = parse_kind(&kind)?;
    respond(state.start_timer(kind), format!("{} timer started", kind))
}

/// Handle POST /api/timers/:kind/pause
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<TimersResponse> {
    let kind = parse_kind(&kind)?;
    respond(state.pause_timer(kind), format!("{} timer paused", kind))
}

/// Handle POST /api/timers/:kind/reset
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<TimersResponse> {
    let kind = parse_kind(&kind)?;
    respond(state.reset_timer(kind), format!("{} timer reset", kind))
}

/// Handle POST /api/timers/start-all
pub async fn start_all_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    respond(state.start_all(), "All timers started".to_string())
}

/// Handle POST /api/timers/pause-all
pub async fn pause_all_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    respond(state.pause_all(), "All timers paused".to_string())
}
