//! Health and status endpoints

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::{
    api::responses::{
        ApiError, ApiResponse, ApiResult, ErrorCode, HealthResponse, RootResponse, StatusResponse,
    },
    state::AppState,
};

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /api/ - Liveness message
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::running())
}

/// Handle GET /api/status - Timers, settings, uptime and recent failures
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let timers = state
        .get_timers()
        .map_err(ApiError::internal)
        .error_code("STATUS_FETCH_ERROR")?;
    let settings = state
        .get_settings()
        .map_err(ApiError::internal)
        .error_code("STATUS_FETCH_ERROR")?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(ApiResponse::ok(StatusResponse {
        timers: (*timers).clone(),
        settings,
        notification_permission: state.services.gateway.permission_state(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        diagnostics: state.diagnostics().snapshot(),
    }))
}
