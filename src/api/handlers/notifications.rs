//! Notification history, recent list and permission endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    api::responses::{
        ApiError, ApiResponse, ApiResult, ErrorCode, PermissionResponse, RecentNotifications,
    },
    engine::TimerKind,
    services::NotificationRecord,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default = "default_retention")]
    pub days: u32,
}

fn default_retention() -> u32 {
    7
}

/// Body of POST /api/notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub title: String,
    pub message: String,
}

/// Handle GET /api/notifications - Logged history, newest first
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<NotificationRecord>> {
    let records = state.services.notification_log.list(query.limit).await;
    Ok(ApiResponse::ok(records))
}

/// Handle POST /api/notifications - Log a notification shown elsewhere
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateNotification>,
) -> ApiResult<NotificationRecord> {
    let record = state
        .services
        .notification_log
        .record(body.kind, &body.title, &body.message)
        .await
        .error_code("NOTIFICATION_CREATE_ERROR")?;
    Ok(ApiResponse::with_message(record, "Notification logged successfully"))
}

/// Handle PUT /api/notifications/:id/read
///
/// Marks the entry in both the logged history and the in-app recent list.
pub async fn mark_read_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let in_log = state
        .services
        .notification_log
        .mark_read(&id)
        .await
        .error_code("NOTIFICATION_UPDATE_ERROR")?;
    let in_recent = state.services.gateway.mark_read(&id);
    if !in_log && !in_recent {
        return Err(
            ApiError::not_found("Notification not found").with_code("NOTIFICATION_UPDATE_ERROR"),
        );
    }
    Ok(ApiResponse::with_message(
        json!({ "notification_id": id, "is_read": true }),
        "Notification marked as read",
    ))
}

/// Handle DELETE /api/notifications/clear?days=N
pub async fn clear_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClearQuery>,
) -> ApiResult<Value> {
    let removed = state
        .services
        .notification_log
        .clear_older_than(query.days)
        .await
        .error_code("NOTIFICATIONS_CLEAR_ERROR")?;
    Ok(ApiResponse::with_message(
        json!({ "cleared_days": query.days, "removed": removed }),
        format!("Notifications older than {} days cleared", query.days),
    ))
}

/// Handle GET /api/notifications/recent - The in-app list
pub async fn recent_handler(State(state): State<Arc<AppState>>) -> ApiResult<RecentNotifications> {
    Ok(ApiResponse::ok(RecentNotifications {
        notifications: state.services.gateway.recent(),
    }))
}

/// Handle DELETE /api/notifications/recent
pub async fn clear_recent_handler(State(state): State<Arc<AppState>>) -> ApiResult<RecentNotifications> {
    state.services.gateway.clear();
    Ok(ApiResponse::with_message(
        RecentNotifications {
            notifications: Vec::new(),
        },
        "Recent notifications cleared",
    ))
}

/// Handle GET /api/notifications/permission
pub async fn permission_handler(State(state): State<Arc<AppState>>) -> ApiResult<PermissionResponse> {
    Ok(ApiResponse::ok(PermissionResponse {
        permission: state.services.gateway.permission_state(),
    }))
}

/// Handle POST /api/notifications/permission - Ask for desktop permission
pub async fn request_permission_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<PermissionResponse> {
    let permission = state.services.gateway.request_permission();
    Ok(ApiResponse::ok(PermissionResponse { permission }))
}
