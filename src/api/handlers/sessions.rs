//! Work session endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::{
    api::responses::{ApiError, ApiResponse, ApiResult, ErrorCode},
    engine::ActivityType,
    services::{Session, SessionPatch},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    30
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub activity_type: String,
}

/// Handle GET /api/sessions/today and POST /api/sessions
///
/// Both return today's active session, creating it on first use.
pub async fn today_handler(State(state): State<Arc<AppState>>) -> ApiResult<Session> {
    let session = state
        .services
        .sessions
        .today_session()
        .await
        .error_code("TODAY_SESSION_FETCH_ERROR")?;
    Ok(ApiResponse::ok(session))
}

/// Handle GET /api/sessions?limit=N
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<Session>> {
    let sessions = state.services.sessions.history(query.limit).await;
    Ok(ApiResponse::ok(sessions))
}

/// Handle PUT /api/sessions/:id
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SessionPatch>,
) -> ApiResult<Session> {
    let session = state
        .services
        .sessions
        .update_session(&id, &patch)
        .await
        .error_code("SESSION_UPDATE_ERROR")?;
    Ok(ApiResponse::with_message(session, "Session updated successfully"))
}

/// Handle POST /api/sessions/:id/activity?activity_type=...
pub async fn activity_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Session> {
    let activity = query
        .activity_type
        .parse::<ActivityType>()
        .map_err(ApiError::bad_request)
        .error_code("ACTIVITY_LOG_ERROR")?;
    let session = state
        .services
        .sessions
        .log_activity(&id, activity)
        .await
        .error_code("ACTIVITY_LOG_ERROR")?;
    Ok(ApiResponse::with_message(
        session,
        format!("{} logged successfully", activity.label()),
    ))
}
