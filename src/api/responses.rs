//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::{
    services::{NotificationEntry, PermissionState, StoreError},
    state::{DiagnosticEntry, Settings, SettingsUpdateError, TimerBoard},
};

/// Success envelope shared by every endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Successful response with a human readable message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    /// Symbolic error code, e.g. `SETTINGS_UPDATE_ERROR`
    pub code: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// An error turned into a status code plus the error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let code = match status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => "INTERNAL_ERROR",
        };
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Replace the generic code derived from the status
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }
}

/// Tag any handler error with the endpoint's symbolic code
pub trait ErrorCode<T> {
    fn error_code(self, code: &'static str) -> Result<T, ApiError>;
}

impl<T, E: Into<ApiError>> ErrorCode<T> for Result<T, E> {
    fn error_code(self, code: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| e.into().with_code(code))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed ({}): {}", self.code, self.message);
        }
        let body = ErrorBody {
            success: false,
            error: self.message,
            code: self.code,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => Self::not_found(format!("{} not found", what)),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<SettingsUpdateError> for ApiError {
    fn from(e: SettingsUpdateError) -> Self {
        match e {
            SettingsUpdateError::Invalid(invalid) => Self::bad_request(invalid.to_string()),
            SettingsUpdateError::State(message) => Self::internal(message),
        }
    }
}

/// Handler result type
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Timer board with its aggregate running flags
#[derive(Debug, Clone, Serialize)]
pub struct TimersResponse {
    pub timers: TimerBoard,
    pub any_active: bool,
    pub all_active: bool,
}

impl TimersResponse {
    pub fn new(board: &TimerBoard) -> Self {
        Self {
            timers: board.clone(),
            any_active: board.any_active(),
            all_active: board.all_active(),
        }
    }
}

/// Enhanced status response with timer information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timers: TimerBoard,
    pub settings: Settings,
    pub notification_permission: PermissionState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub diagnostics: Vec<DiagnosticEntry>,
}

/// Current notification permission
#[derive(Debug, Clone, Serialize)]
pub struct PermissionResponse {
    pub permission: PermissionState,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentNotifications {
    pub notifications: Vec<NotificationEntry>,
}

/// Single-user profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: String,
    pub settings: Settings,
    pub last_active: DateTime<Utc>,
}

/// Body of the `GET /api/` liveness route
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

impl RootResponse {
    pub fn running() -> Self {
        Self {
            message: "HealthGuard API is running!".to_string(),
            status: "healthy".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_default_to_a_code_for_their_status() {
        assert_eq!(ApiError::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ApiError::not_found("x").code, "NOT_FOUND");
        assert_eq!(ApiError::internal("x").code, "INTERNAL_ERROR");
    }

    #[test]
    fn error_code_tags_store_failures() {
        let result: Result<(), StoreError> = Err(StoreError::NotFound("Session s".to_string()));
        let error = result.error_code("SESSION_UPDATE_ERROR").unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.code, "SESSION_UPDATE_ERROR");
        assert_eq!(error.message, "Session s not found");
    }
}
